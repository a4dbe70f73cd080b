use super::error::EngineError;

/// Cumulative raw-section positions at which each logical step ends.
///
/// Entry `k` is the raw boundary number (1-based) of the final occurrence of
/// logical step `k + 1`. Entries are at least 1 and never decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionIndex(Vec<usize>);

impl PositionIndex {
    pub fn new(positions: Vec<usize>) -> Result<Self, EngineError> {
        if let Some(pos) = positions.iter().position(|&p| p == 0) {
            return Err(EngineError::InvalidPositionIndex(format!(
                "entry {} is zero; raw sections are numbered from 1",
                pos + 1
            )));
        }
        if let Some(pos) = positions.windows(2).position(|w| w[1] < w[0]) {
            return Err(EngineError::InvalidPositionIndex(format!(
                "entry {} ({}) is smaller than entry {} ({})",
                pos + 2,
                positions[pos + 1],
                pos + 1,
                positions[pos]
            )));
        }
        Ok(Self(positions))
    }

    /// Builds the index from per-step counts by taking running totals.
    pub fn from_counts(counts: &[usize]) -> Result<Self, EngineError> {
        let positions = counts
            .iter()
            .scan(0usize, |total, &count| {
                *total += count;
                Some(*total)
            })
            .collect();
        Self::new(positions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, pointer: usize) -> Option<usize> {
        self.0.get(pointer).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// The sequencer's verdict on one raw section boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The section starting here is the last occurrence of logical steps
    /// `first_step..=last_step` (more than one step when the index repeats a position).
    Final {
        raw_section: usize,
        first_step: usize,
        last_step: usize,
    },
    /// An earlier occurrence that a later section of the same step supersedes.
    Intermediate { raw_section: usize },
    /// Every logical step has already been assigned.
    Exhausted { raw_section: usize },
}

/// Assigns raw section boundaries to logical steps, keeping only the last
/// occurrence of each step.
#[derive(Debug, Clone)]
pub struct RecordSequencer {
    index: PositionIndex,
    pointer: usize,
    raw_count: usize,
}

impl RecordSequencer {
    pub fn new(index: PositionIndex) -> Self {
        Self {
            index,
            pointer: 0,
            raw_count: 0,
        }
    }

    pub fn observe_boundary(&mut self) -> Boundary {
        self.raw_count += 1;
        let raw_section = self.raw_count;

        match self.index.get(self.pointer) {
            None => Boundary::Exhausted { raw_section },
            Some(target) if target == raw_section => {
                let first_step = self.pointer + 1;
                while self.index.get(self.pointer) == Some(raw_section) {
                    self.pointer += 1;
                }
                Boundary::Final {
                    raw_section,
                    first_step,
                    last_step: self.pointer,
                }
            }
            Some(_) => Boundary::Intermediate { raw_section },
        }
    }

    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    /// Number of logical steps assigned so far.
    pub fn assigned(&self) -> usize {
        self.pointer
    }

    pub fn expected(&self) -> usize {
        self.index.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pointer >= self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_counts_builds_running_totals() {
        let index = PositionIndex::from_counts(&[3, 2, 3]).unwrap();
        assert_eq!(index.as_slice(), &[3, 5, 8]);
    }

    #[test]
    fn decreasing_index_is_rejected() {
        let result = PositionIndex::new(vec![3, 2]);
        assert!(matches!(result, Err(EngineError::InvalidPositionIndex(_))));
    }

    #[test]
    fn zero_entry_is_rejected() {
        let result = PositionIndex::from_counts(&[0, 2]);
        assert!(matches!(result, Err(EngineError::InvalidPositionIndex(_))));
    }

    #[test]
    fn boundaries_are_classified_against_the_index() {
        let mut seq = RecordSequencer::new(PositionIndex::new(vec![2, 4]).unwrap());
        assert_eq!(
            seq.observe_boundary(),
            Boundary::Intermediate { raw_section: 1 }
        );
        assert_eq!(
            seq.observe_boundary(),
            Boundary::Final {
                raw_section: 2,
                first_step: 1,
                last_step: 1
            }
        );
        assert_eq!(
            seq.observe_boundary(),
            Boundary::Intermediate { raw_section: 3 }
        );
        assert_eq!(
            seq.observe_boundary(),
            Boundary::Final {
                raw_section: 4,
                first_step: 2,
                last_step: 2
            }
        );
        assert!(seq.is_exhausted());
        assert_eq!(seq.observe_boundary(), Boundary::Exhausted { raw_section: 5 });
        assert_eq!(seq.raw_count(), 5);
    }

    #[test]
    fn repeated_positions_share_one_raw_section() {
        let mut seq = RecordSequencer::new(PositionIndex::new(vec![1, 3, 3, 4]).unwrap());
        seq.observe_boundary();
        seq.observe_boundary();
        assert_eq!(
            seq.observe_boundary(),
            Boundary::Final {
                raw_section: 3,
                first_step: 2,
                last_step: 3
            }
        );
        assert_eq!(seq.assigned(), 3);
        assert_eq!(
            seq.observe_boundary(),
            Boundary::Final {
                raw_section: 4,
                first_step: 4,
                last_step: 4
            }
        );
    }
}
