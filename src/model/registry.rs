//! Worker display names.

use super::roster::WorkerId;

/// Ordered display names; index `i` names worker id `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerRegistry {
    names: Vec<String>,
}

impl WorkerRegistry {
    /// Wraps names in worker-id order.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Number of named workers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` when no worker is named.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of `worker`, or `None` for an unknown id.
    pub fn name(&self, worker: WorkerId) -> Option<&str> {
        worker
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Iterates `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (WorkerId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (i + 1, n.as_str()))
    }
}
