use crate::core::utils::geometry::euclidean_distance;
use nalgebra::Point3;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FieldError {
    #[error("Malformed row on line {line}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid number on line {line}: '{value}'")]
    InvalidNumber { line: usize, value: String },
}

/// Returns the whitespace-delimited tokens of `line` in `range`.
///
/// Fails with [`FieldError::MalformedRow`] when the line has fewer than
/// `range.end` tokens.
pub fn tokens_in_range(
    line: &str,
    range: Range<usize>,
    line_number: usize,
) -> Result<Vec<&str>, FieldError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < range.end {
        return Err(FieldError::MalformedRow {
            line: line_number,
            expected: range.end,
            found: tokens.len(),
        });
    }
    Ok(tokens[range].to_vec())
}

pub fn parse_number<T: std::str::FromStr>(token: &str, line_number: usize) -> Result<T, FieldError> {
    token.parse().map_err(|_| FieldError::InvalidNumber {
        line: line_number,
        value: token.to_string(),
    })
}

pub fn extract_fields(
    line: &str,
    range: Range<usize>,
    line_number: usize,
) -> Result<Vec<f64>, FieldError> {
    tokens_in_range(line, range, line_number)?
        .into_iter()
        .map(|token| parse_number(token, line_number))
        .collect()
}

/// Parses three consecutive tokens starting at `first_token` as a 3-D point.
pub fn extract_point(
    line: &str,
    first_token: usize,
    line_number: usize,
) -> Result<Point3<f64>, FieldError> {
    let fields = extract_fields(line, first_token..first_token + 3, line_number)?;
    Ok(Point3::new(fields[0], fields[1], fields[2]))
}

/// Pairs coordinates by order of appearance: the 1st with the 2nd, then the 3rd
/// with the 4th, and so on. Each completed pair yields one distance and clears the
/// tracker; only the most recent distance is remembered.
#[derive(Debug, Clone, Default)]
pub struct PairTracker {
    pending: Option<Point3<f64>>,
    last_distance: Option<f64>,
}

impl PairTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point3<f64>) -> Option<f64> {
        match self.pending.take() {
            Some(first) => {
                let distance = euclidean_distance(&first, &point);
                self.last_distance = Some(distance);
                Some(distance)
            }
            None => {
                self.pending = Some(point);
                None
            }
        }
    }

    pub fn last_distance(&self) -> Option<f64> {
        self.last_distance
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_point_reads_xyz_tokens() {
        let p = extract_point("Fe   1.0  -2.5  3.25", 1, 7).unwrap();
        assert_eq!(p, Point3::new(1.0, -2.5, 3.25));
    }

    #[test]
    fn short_row_raises_malformed_row() {
        let err = extract_point("Fe 1.0 2.0", 1, 12).unwrap_err();
        assert_eq!(
            err,
            FieldError::MalformedRow {
                line: 12,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn non_numeric_token_raises_invalid_number() {
        let err = extract_fields("C 1.0 abc 2.0", 1..4, 3).unwrap_err();
        assert!(matches!(err, FieldError::InvalidNumber { line: 3, ref value } if value == "abc"));
    }

    #[test]
    fn pair_tracker_pairs_by_parity() {
        let mut tracker = PairTracker::new();
        assert_eq!(tracker.push(Point3::new(0.0, 0.0, 0.0)), None);
        assert_eq!(tracker.push(Point3::new(3.0, 4.0, 0.0)), Some(5.0));
        assert!(!tracker.has_pending());

        assert_eq!(tracker.push(Point3::new(1.0, 1.0, 1.0)), None);
        assert_eq!(tracker.last_distance(), Some(5.0));
        assert_eq!(tracker.push(Point3::new(1.0, 1.0, 2.0)), Some(1.0));
        assert_eq!(tracker.last_distance(), Some(1.0));
    }

    #[test]
    fn pair_tracker_does_not_pair_across_consumed_pairs() {
        let mut tracker = PairTracker::new();
        tracker.push(Point3::new(0.0, 0.0, 0.0));
        tracker.push(Point3::new(0.0, 0.0, 1.0));
        assert_eq!(tracker.push(Point3::new(0.0, 0.0, 10.0)), None);
        assert!(tracker.has_pending());
    }
}
