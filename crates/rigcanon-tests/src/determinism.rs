//! Determinism checks for canonicalization output.
//!
//! Canonical skeletons are text (JSON or rig records), so differences are
//! reported by line rather than by byte.
//!
//! # Example
//!
//! ```rust,ignore
//! use rigcanon_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| render(&rig), 3);
//! result.assert_deterministic();
//! ```

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first differing line.
    pub diff_info: Option<LineDiff>,
}

/// The first line on which two runs disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// 1-based line number.
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
}

impl fmt::Display for LineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at line {} (run {}):\n  expected: {}\n  actual:   {}",
            self.line,
            self.run_index,
            self.expected.as_deref().unwrap_or("<end of output>"),
            self.actual.as_deref().unwrap_or("<end of output>")
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(ref diff) = self.diff_info {
            panic!(
                "Non-deterministic output detected!\nRuns: {}\nHash: {}\n{}",
                self.runs, self.hash, diff
            );
        }
    }
}

/// Finds the first line where `expected` and `actual` differ.
pub fn first_line_diff(expected: &str, actual: &str, run_index: usize) -> Option<LineDiff> {
    let mut left = expected.lines();
    let mut right = actual.lines();
    let mut line = 1;
    loop {
        match (left.next(), right.next()) {
            (None, None) => return None,
            (a, b) if a == b => line += 1,
            (a, b) => {
                return Some(LineDiff {
                    line,
                    expected: a.map(str::to_string),
                    actual: b.map(str::to_string),
                    run_index,
                })
            }
        }
    }
}

/// Runs `render` `runs` times and compares every output to the first.
pub fn verify_determinism<F>(render: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> String,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = render();
    let hash = blake3::hash(reference.as_bytes()).to_hex().to_string();

    for run_index in 1..runs {
        let output = render();
        if output != reference {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash,
                diff_info: first_line_diff(&reference, &output, run_index),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash,
        diff_info: None,
    }
}

/// Verifies determinism and panics with a line diff if it fails.
pub fn assert_deterministic<F>(render: F, runs: usize) -> String
where
    F: Fn() -> String,
{
    let result = verify_determinism(render, runs);
    result.assert_deterministic();
    result.hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_runs() {
        let result = verify_determinism(|| "a\nb\n".to_string(), 3);
        assert!(result.is_deterministic);
        assert_eq!(result.hash.len(), 64);
    }

    #[test]
    fn test_reports_first_differing_line() {
        let counter = Cell::new(0);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                format!("same\nrun {}\n", counter.get())
            },
            2,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.line, 2);
        assert_eq!(diff.expected.as_deref(), Some("run 1"));
        assert_eq!(diff.actual.as_deref(), Some("run 2"));
    }

    #[test]
    fn test_length_difference() {
        let diff = first_line_diff("a\nb", "a", 1).unwrap();
        assert_eq!(diff.line, 2);
        assert_eq!(diff.actual, None);
    }
}
