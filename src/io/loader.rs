//! Parsing of availability and worker-name sources.
//!
//! Availability format, over non-blank lines with surrounding whitespace
//! stripped:
//!
//! ```text
//! <shifts_per_day>
//! <workers_per_shift>
//! <worker_count>
//! <day_count>
//! <codes of worker 1>        e.g. "00 12 20 00 11 00 02"
//! ...
//! <codes of worker N>
//! <anything else is ignored>
//! ```
//!
//! Each code row has `day_count * shifts_per_day` digits in `0..=2`;
//! whitespace inside a row is ignored.

use std::fs;
use std::path::Path;

use crate::error::{Result, RosterError};
use crate::model::{AvailabilityMatrix, Preference, StructuralParams, WorkerRegistry};

/// Structural parameters and preferences read from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInput {
    pub availability: AvailabilityMatrix,
}

impl ProblemInput {
    /// Shape of the problem, as carried by the availability matrix.
    pub fn params(&self) -> &StructuralParams {
        self.availability.params()
    }
}

/// Everything the engine needs to run, plus worker names for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInput {
    pub availability: AvailabilityMatrix,
    pub registry: WorkerRegistry,
}

impl LoadedInput {
    /// Shape of the problem, as carried by the availability matrix.
    pub fn params(&self) -> &StructuralParams {
        self.availability.params()
    }
}

/// Loads the availability source and the worker-name source.
pub fn load(data_path: impl AsRef<Path>, names_path: impl AsRef<Path>) -> Result<LoadedInput> {
    let ProblemInput { availability } = load_problem(data_path)?;
    let params = *availability.params();
    let registry = load_registry(names_path, params.worker_count)?;
    tracing::info!(
        workers = params.worker_count,
        days = params.day_count,
        shifts_per_day = params.shifts_per_day,
        workers_per_shift = params.workers_per_shift,
        "input loaded"
    );
    Ok(LoadedInput {
        availability,
        registry,
    })
}

/// Reads and parses an availability source.
pub fn load_problem(path: impl AsRef<Path>) -> Result<ProblemInput> {
    parse_problem(&read_source(path.as_ref())?)
}

/// Reads and parses a worker-name source, keeping the first `worker_count`
/// names.
pub fn load_registry(path: impl AsRef<Path>, worker_count: usize) -> Result<WorkerRegistry> {
    parse_registry(&read_source(path.as_ref())?, worker_count)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RosterError::InputMissing {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-blank, trimmed lines paired with their 1-based position among
/// non-blank lines.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(i, l)| (i + 1, l))
}

/// Parses an availability source.
///
/// # Examples
///
/// ```
/// use u_roster::io::parse_problem;
///
/// let input = parse_problem("1\n1\n2\n1\n0\n2\n").unwrap();
/// assert_eq!(input.params().worker_count, 2);
/// ```
pub fn parse_problem(text: &str) -> Result<ProblemInput> {
    let mut lines = content_lines(text);

    const HEADER: [&str; 4] = [
        "shifts_per_day",
        "workers_per_shift",
        "worker_count",
        "day_count",
    ];
    let mut header = [0usize; 4];
    let mut header_end = 0;
    for (slot, name) in header.iter_mut().zip(HEADER) {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| RosterError::malformed(0, format!("missing header line `{name}`")))?;
        let value: usize = line.parse().map_err(|_| {
            RosterError::malformed(line_no, format!("`{name}` must be an integer, got `{line}`"))
        })?;
        if value == 0 {
            return Err(RosterError::malformed(
                line_no,
                format!("`{name}` must be positive"),
            ));
        }
        *slot = value;
        header_end = line_no;
    }
    let [shifts_per_day, workers_per_shift, worker_count, day_count] = header;
    let params = StructuralParams::new(shifts_per_day, workers_per_shift, worker_count, day_count)
        .map_err(|e| RosterError::malformed(header_end, e.to_string()))?;

    let expected = params.codes_per_worker();
    // grows with the rows actually present; worker_count is untrusted
    let mut rows = Vec::new();
    for worker in 1..=worker_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            RosterError::malformed(0, format!("missing availability row for worker {worker}"))
        })?;
        rows.push(parse_codes(line_no, line, expected)?);
    }

    let availability = AvailabilityMatrix::new(params, rows)?;
    Ok(ProblemInput { availability })
}

fn parse_codes(line_no: usize, line: &str, expected: usize) -> Result<Vec<Preference>> {
    let codes = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            Preference::from_digit(c).ok_or_else(|| {
                RosterError::malformed(line_no, format!("invalid preference code `{c}`"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if codes.len() != expected {
        return Err(RosterError::malformed(
            line_no,
            format!("expected {expected} preference codes, got {}", codes.len()),
        ));
    }
    Ok(codes)
}

/// Parses a worker-name source: one name per non-blank line, the first
/// `worker_count` of which name ids `1..=worker_count`.
pub fn parse_registry(text: &str, worker_count: usize) -> Result<WorkerRegistry> {
    let names: Vec<String> = content_lines(text)
        .take(worker_count)
        .map(|(_, name)| name.to_string())
        .collect();
    if names.len() < worker_count {
        return Err(RosterError::malformed(
            0,
            format!(
                "expected {worker_count} worker names, found {}",
                names.len()
            ),
        ));
    }
    Ok(WorkerRegistry::new(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2
3
10
7
00 00 00 00 00 22 22
00 11 00 00 00 00 00
01 01 01 01 01 01 01
00 00 00 00 00 00 00

22 22 00 00 00 00 00
00 00 00 00 00 00 00
10 10 10 10 10 10 10
00 00 00 00 00 00 00
00 00 02 00 00 00 00
00 00 00 00 00 00 00
trailing notes are ignored
";

    #[test]
    fn test_parse_sample() {
        let input = parse_problem(SAMPLE).unwrap();
        let p = input.params();
        assert_eq!(
            (
                p.shifts_per_day,
                p.workers_per_shift,
                p.worker_count,
                p.day_count
            ),
            (2, 3, 10, 7)
        );
        let m = &input.availability;
        assert_eq!(m.worker_count(), 10);
        assert_eq!(m.preference(1, 10), Preference::Unavailable);
        assert_eq!(m.preference(2, 2), Preference::Reluctant);
        assert_eq!(m.preference(7, 0), Preference::Reluctant);
        assert_eq!(m.preference(9, 5), Preference::Unavailable);
    }

    #[test]
    fn test_short_header() {
        let err = parse_problem("2\n3\n10\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 0, .. }));
    }

    #[test]
    fn test_non_numeric_header() {
        let err = parse_problem("2\nthree\n10\n7\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 2, .. }));
    }

    #[test]
    fn test_zero_header() {
        let err = parse_problem("2\n3\n0\n7\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 3, .. }));
    }

    #[test]
    fn test_huge_worker_count_rejected_without_allocating() {
        let err = parse_problem("1\n1\n18446744073709551615\n1\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 4, .. }));
    }

    #[test]
    fn test_overflowing_slot_count_rejected() {
        let err = parse_problem("4294967296\n1\n1\n4294967296\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 4, .. }));
    }

    #[test]
    fn test_large_worker_count_with_missing_rows() {
        let err = parse_problem("1\n1\n1000000000000\n1\n0\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 0, .. }));
    }

    #[test]
    fn test_missing_rows() {
        let err = parse_problem("1\n1\n3\n2\n00\n01\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 0, .. }));
    }

    #[test]
    fn test_bad_code() {
        let err = parse_problem("1\n1\n2\n2\n00\n03\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 6, .. }));
    }

    #[test]
    fn test_wrong_row_length() {
        let err = parse_problem("1\n1\n2\n2\n000\n00\n").unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { line: 5, .. }));
    }

    #[test]
    fn test_registry() {
        let reg = parse_registry("Anna\n\n  Piotr \nEwa\nExtra\n", 3).unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.name(2), Some("Piotr"));
        assert_eq!(reg.name(4), None);
    }

    #[test]
    fn test_registry_too_short() {
        let err = parse_registry("Anna\n", 2).unwrap_err();
        assert!(matches!(err, RosterError::InputMalformed { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_problem("/nonexistent/u-roster/data.txt").unwrap_err();
        assert!(matches!(err, RosterError::InputMissing { .. }));
    }
}
