use itertools::Itertools;
use thiserror::Error;

use crate::builder::FigureBuilder;
use crate::location::Location;
use crate::postman::{solve, Outcome};

/// Marker reported for a figure whose components cannot all be reached in
/// one walk.
pub const DISCONNECTED_MARKER: &str = "~x(";

/// Ways a batch can fail to parse. Any of these aborts the batch before a
/// single case is solved; there is no per-case recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The input held no case count at all.
    #[error("missing case count on the first input line")]
    MissingCaseCount,
    /// A case or segment count was not a number.
    #[error("unparseable count `{0}`")]
    BadCount(String),
    /// The input ended before a case's announced lines arrived.
    #[error("case {case}: input ended early")]
    MissingLine {
        /// 1-based case number.
        case: usize,
    },
    /// A segment line held fewer than two point labels.
    #[error("case {case}: segment line `{line}` holds fewer than two point labels")]
    TruncatedSegment {
        /// 1-based case number.
        case: usize,
        /// The offending line, verbatim.
        line: String,
    },
    /// A token was not in the `A1`-`E5` vocabulary.
    #[error("case {case}: `{token}` is not a grid point label")]
    BadLabel {
        /// 1-based case number.
        case: usize,
        /// The two characters that failed to resolve.
        token: String,
    },
}

/// Parse and solve a whole input batch, returning all case lines joined
/// with newlines.
///
/// The first meaningful line carries the case count; each case opens with
/// its segment count followed by that many segment lines. Blank lines are
/// skipped wherever they appear, and whitespace within a segment line is
/// insignificant; only its first four non-space characters matter.
pub fn run_batch(input: &str) -> Result<String, BatchError> {
    let cases = parse_batch(input)?;
    Ok(cases
        .iter()
        .enumerate()
        .map(|(i, segments)| format!("Case {}: {}", i + 1, solve_case(segments)))
        .join("\n"))
}

fn solve_case(segments: &[(Location, Location)]) -> String {
    let mut builder = FigureBuilder::new();
    for &(from, to) in segments {
        builder.segment(from, to);
    }
    match solve(builder.finish()) {
        Outcome::Disconnected => DISCONNECTED_MARKER.to_owned(),
        Outcome::Drawable(length) => format!("{length:.2}"),
    }
}

fn parse_batch(input: &str) -> Result<Vec<Vec<(Location, Location)>>, BatchError> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().ok_or(BatchError::MissingCaseCount)?;
    let case_count = parse_count(header)?;

    let mut cases = Vec::with_capacity(case_count);
    for case in 1..=case_count {
        let header = lines.next().ok_or(BatchError::MissingLine { case })?;
        let segment_count = parse_count(header)?;
        let mut segments = Vec::with_capacity(segment_count);
        for _ in 0..segment_count {
            let line = lines.next().ok_or(BatchError::MissingLine { case })?;
            segments.push(parse_segment(case, line)?);
        }
        cases.push(segments);
    }
    Ok(cases)
}

fn parse_count(token: &str) -> Result<usize, BatchError> {
    token
        .parse()
        .map_err(|_| BatchError::BadCount(token.to_owned()))
}

fn parse_segment(case: usize, line: &str) -> Result<(Location, Location), BatchError> {
    let mut meaningful = line.chars().filter(|c| !c.is_whitespace());
    let mut label = || {
        let (row, col) = (meaningful.next()?, meaningful.next()?);
        Some((row, col))
    };
    let resolve = |chars: Option<(char, char)>| match chars {
        None => Err(BatchError::TruncatedSegment {
            case,
            line: line.to_owned(),
        }),
        Some((row, col)) => Location::from_label_chars(row, col).ok_or_else(|| BatchError::BadLabel {
            case,
            token: format!("{row}{col}"),
        }),
    };
    let from = resolve(label())?;
    let to = resolve(label())?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jammed_and_spaced_labels_parse_alike() {
        let spaced = run_batch("1\n1\nA1 B2\n").unwrap();
        let jammed = run_batch("1\n1\nA1B2\n").unwrap();
        let scattered = run_batch("1\n1\nA 1B2\n").unwrap();
        assert_eq!(spaced, jammed);
        assert_eq!(spaced, scattered);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let with_blanks = run_batch("1\n\n1\n\n\nA1 A2\n\n").unwrap();
        assert_eq!(with_blanks, "Case 1: 1.00");
    }

    #[test]
    fn missing_case_count() {
        assert_eq!(run_batch("   \n"), Err(BatchError::MissingCaseCount));
    }

    #[test]
    fn truncated_batch() {
        assert_eq!(
            run_batch("2\n1\nA1 A2\n"),
            Err(BatchError::MissingLine { case: 2 })
        );
    }

    #[test]
    fn truncated_segment_line() {
        assert_eq!(
            run_batch("1\n1\nA1\n"),
            Err(BatchError::TruncatedSegment {
                case: 1,
                line: "A1".to_owned()
            })
        );
    }

    #[test]
    fn label_off_the_grid() {
        assert_eq!(
            run_batch("1\n1\nA1 F9\n"),
            Err(BatchError::BadLabel {
                case: 1,
                token: "F9".to_owned()
            })
        );
    }

    #[test]
    fn unparseable_count() {
        assert_eq!(
            run_batch("one\n"),
            Err(BatchError::BadCount("one".to_owned()))
        );
    }
}
