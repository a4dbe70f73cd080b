use super::accumulator::SectionAccumulator;
use super::classify::{Category, LineClassifier};
use super::error::EngineError;
use super::sequencer::{Boundary, PositionIndex, RecordSequencer};
use crate::core::models::section::SectionRecord;
use std::io::BufRead;
use tracing::{debug, trace, warn};

/// Non-fatal conditions met while scanning. They are collected and logged, never
/// raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// More raw sections were found than the position index accounts for.
    SectionIndexExhausted { raw_section: usize, line: usize },
    /// A section boundary appeared before any section start. The line is ignored.
    PrematureBoundary { line: usize },
    /// A terminator appeared while no section was open.
    OrphanTerminator { line: usize },
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Sealed records in logical order.
    pub records: Vec<SectionRecord>,
    pub warnings: Vec<ScanWarning>,
    pub raw_sections: usize,
    pub lines_read: usize,
}

impl ScanOutcome {
    pub fn exhausted_sections(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ScanWarning::SectionIndexExhausted { .. }))
            .count()
    }
}

/// Single-pass scanner that keeps, for every logical step, only the last raw
/// section belonging to it.
///
/// Boundaries only count once a [`Category::SectionStart`] has been seen; an
/// earlier [`Category::SectionBoundary`] is reported and skipped. Every boundary
/// first seals the open section (if any) and then asks the
/// [`RecordSequencer`] whether the section that begins at this boundary is a final
/// occurrence. While a section is open every line, including its opening boundary,
/// is appended to it. At end of input an open section is flushed exactly once.
pub struct SequencedScanner<C> {
    classifier: C,
    accumulator: SectionAccumulator,
    sequencer: RecordSequencer,
    shared_steps: Option<(usize, usize)>,
    started: bool,
    outcome: ScanOutcome,
}

impl<C: LineClassifier> SequencedScanner<C> {
    pub fn new(classifier: C, index: PositionIndex) -> Self {
        Self {
            classifier,
            accumulator: SectionAccumulator::new(),
            sequencer: RecordSequencer::new(index),
            shared_steps: None,
            started: false,
            outcome: ScanOutcome::default(),
        }
    }

    pub fn feed(&mut self, line: &str) {
        self.outcome.lines_read += 1;
        let line_number = self.outcome.lines_read;

        match self.classifier.classify(line) {
            Category::SectionStart => {
                self.started = true;
                self.on_boundary(line_number);
            }
            Category::SectionBoundary if !self.started => {
                trace!(line = line_number, "Ignoring boundary before any section start");
                self.outcome
                    .warnings
                    .push(ScanWarning::PrematureBoundary { line: line_number });
                return;
            }
            Category::SectionBoundary => self.on_boundary(line_number),
            Category::Terminator => {
                if !self.accumulator.is_open() {
                    self.outcome
                        .warnings
                        .push(ScanWarning::OrphanTerminator { line: line_number });
                }
                self.seal_current();
                return;
            }
            _ => {}
        }

        self.accumulator.append(line);
    }

    fn on_boundary(&mut self, line_number: usize) {
        self.seal_current();

        match self.sequencer.observe_boundary() {
            Boundary::Final {
                raw_section,
                first_step,
                last_step,
            } => {
                trace!(
                    raw_section,
                    first_step, "Opening final section for scan step"
                );
                self.accumulator.open(first_step, raw_section);
                if last_step > first_step {
                    self.shared_steps = Some((first_step + 1, last_step));
                }
            }
            Boundary::Intermediate { raw_section } => {
                trace!(raw_section, "Skipping intermediate section");
            }
            Boundary::Exhausted { raw_section } => {
                self.outcome.warnings.push(ScanWarning::SectionIndexExhausted {
                    raw_section,
                    line: line_number,
                });
            }
        }
    }

    fn seal_current(&mut self) {
        let Some(record) = self.accumulator.seal() else {
            return;
        };
        let shared: Vec<SectionRecord> = match self.shared_steps.take() {
            Some((first, last)) => (first..=last)
                .map(|step| SectionRecord {
                    logical_index: step,
                    ..record.clone()
                })
                .collect(),
            None => Vec::new(),
        };
        self.outcome.records.push(record);
        self.outcome.records.extend(shared);
    }

    /// Flushes any open section and returns the collected records.
    pub fn finish(mut self) -> ScanOutcome {
        self.seal_current();
        self.outcome.raw_sections = self.sequencer.raw_count();

        let assigned = self.outcome.records.len();
        let expected = self.sequencer.expected();
        if assigned < expected {
            debug!(
                assigned,
                expected, "Input ended before every logical step received a section"
            );
        }
        let exhausted = self.outcome.exhausted_sections();
        if exhausted > 0 {
            warn!(
                "{} raw section(s) beyond the last expected scan step were ignored",
                exhausted
            );
        }
        let ignored = self.outcome.warnings.len() - exhausted;
        if ignored > 0 {
            warn!(
                "{} boundary or terminator line(s) outside an open section were ignored",
                ignored
            );
        }
        self.outcome
    }

    /// Feeds every line of `reader` and finishes the scan.
    pub fn scan(mut self, reader: &mut impl BufRead) -> Result<ScanOutcome, EngineError> {
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if reader.read_line(&mut buffer)? == 0 {
                break;
            }
            let line = buffer.trim_end_matches(['\n', '\r']);
            self.feed(line);
        }
        Ok(self.finish())
    }
}

/// Convenience wrapper around [`SequencedScanner`].
pub fn scan_sections<C: LineClassifier>(
    reader: &mut impl BufRead,
    classifier: C,
    index: PositionIndex,
) -> Result<ScanOutcome, EngineError> {
    SequencedScanner::new(classifier, index).scan(reader)
}
