use crate::core::models::section::SectionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulatorState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug)]
struct OpenSection {
    logical_index: usize,
    raw_section: usize,
    content: String,
}

/// Holds the section currently being read.
///
/// The accumulator cycles `Closed -> Open -> Closed` and may be reopened any number
/// of times. A section becomes a [`SectionRecord`] only when it is sealed, after
/// which it is never touched again.
#[derive(Debug, Default)]
pub struct SectionAccumulator {
    current: Option<OpenSection>,
}

impl SectionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AccumulatorState {
        if self.current.is_some() {
            AccumulatorState::Open
        } else {
            AccumulatorState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Opens a new section. If one was already open it is sealed first and returned,
    /// so no content is ever silently dropped.
    pub fn open(&mut self, logical_index: usize, raw_section: usize) -> Option<SectionRecord> {
        let previous = self.seal();
        self.current = Some(OpenSection {
            logical_index,
            raw_section,
            content: String::new(),
        });
        previous
    }

    /// Appends a line to the open section. Returns `false` when closed.
    pub fn append(&mut self, line: &str) -> bool {
        match self.current.as_mut() {
            Some(section) => {
                section.content.push_str(line);
                if !line.ends_with('\n') {
                    section.content.push('\n');
                }
                true
            }
            None => false,
        }
    }

    pub fn seal(&mut self) -> Option<SectionRecord> {
        self.current.take().map(|section| SectionRecord {
            logical_index: section.logical_index,
            raw_section: section.raw_section,
            content: section.content,
            energy: None,
        })
    }
}
