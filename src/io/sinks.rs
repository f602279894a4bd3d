//! Text sinks for run traces and result summaries.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::Roster;
use crate::sa::{AcceptEvent, AnnealMonitor, AnnealStats};

/// Default spacing of trace lines, in proposal attempts.
pub const DEFAULT_TRACE_EVERY: usize = 5;

/// Coarse progress trace: one penalty per line.
///
/// A line is written for each accepted move whose attempt counter is a
/// multiple of `every`.
#[derive(Debug)]
pub struct PenaltyTrace<W: Write> {
    out: W,
    every: usize,
    lines: usize,
}

impl PenaltyTrace<BufWriter<File>> {
    /// Creates (or truncates) a trace file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> PenaltyTrace<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            every: DEFAULT_TRACE_EVERY,
            lines: 0,
        }
    }

    /// Sets the attempt spacing; values below 1 are treated as 1.
    pub fn with_every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> AnnealMonitor for PenaltyTrace<W> {
    fn on_accept(&mut self, event: &AcceptEvent) -> io::Result<()> {
        if event.attempt % self.every == 0 {
            writeln!(self.out, "{}", event.penalty)?;
            self.lines += 1;
        }
        Ok(())
    }
}

/// Append-only log with one summary line per optimizer run.
#[derive(Debug)]
pub struct ResultLog<W: Write> {
    out: W,
}

impl ResultLog<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ResultLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Appends the summary of one run.
    pub fn record(&mut self, stats: &AnnealStats, roster: &Roster) -> io::Result<()> {
        writeln!(self.out, "{}", summary_line(stats, roster))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats one run summary.
///
/// ```
/// use u_roster::io::summary_line;
/// use u_roster::model::Roster;
/// use u_roster::sa::AnnealStats;
///
/// let stats = AnnealStats {
///     attempts: 120,
///     last_improvement: 37,
///     accepted_moves: 60,
///     improving_moves: 4,
///     temperature_levels: 3,
///     final_temperature: 0.04,
///     final_penalty: 2,
///     cancelled: false,
///     stalled: false,
/// };
/// assert_eq!(
///     summary_line(&stats, &Roster::new(vec![1, 3, 2])),
///     "End penalty: 2, Total attempts: 120, End attempt: 37, Configuration: [1, 3, 2]"
/// );
/// ```
pub fn summary_line(stats: &AnnealStats, roster: &Roster) -> String {
    format!(
        "End penalty: {}, Total attempts: {}, End attempt: {}, Configuration: {}",
        stats.final_penalty, stats.attempts, stats.last_improvement, roster
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(attempt: usize, penalty: u32) -> AcceptEvent {
        AcceptEvent {
            attempt,
            previous: penalty + 1,
            penalty,
            temperature: 1.0,
        }
    }

    #[test]
    fn test_trace_writes_every_fifth_attempt() {
        let mut trace = PenaltyTrace::new(Vec::new());
        for (attempt, penalty) in [(3, 9), (5, 8), (7, 7), (10, 6), (11, 5)] {
            trace.on_accept(&event(attempt, penalty)).unwrap();
        }
        assert_eq!(trace.lines(), 2);
        let out = String::from_utf8(trace.finish().unwrap()).unwrap();
        assert_eq!(out, "8\n6\n");
    }

    #[test]
    fn test_trace_custom_spacing() {
        let mut trace = PenaltyTrace::new(Vec::new()).with_every(0);
        trace.on_accept(&event(3, 1)).unwrap();
        assert_eq!(trace.lines(), 1);
    }

    #[test]
    fn test_result_log_appends_lines() {
        let stats = AnnealStats {
            attempts: 10,
            last_improvement: 4,
            accepted_moves: 5,
            improving_moves: 2,
            temperature_levels: 1,
            final_temperature: 0.01,
            final_penalty: 0,
            cancelled: false,
            stalled: false,
        };
        let mut log = ResultLog::new(Vec::new());
        log.record(&stats, &Roster::new(vec![1])).unwrap();
        log.record(&stats, &Roster::new(vec![2])).unwrap();
        let out = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("Configuration: [2]"));
    }
}
