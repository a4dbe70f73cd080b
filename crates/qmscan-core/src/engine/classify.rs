/// What a single log line means to the section scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    SectionStart,
    SectionBoundary,
    DataRow,
    Terminator,
    Ignored,
}

/// Maps one line of text to a [`Category`].
///
/// Implementations must be pure and must never panic on short or blank lines;
/// anything that cannot be classified is [`Category::Ignored`].
pub trait LineClassifier {
    fn classify(&self, line: &str) -> Category;
}

impl<F> LineClassifier for F
where
    F: Fn(&str) -> Category,
{
    fn classify(&self, line: &str) -> Category {
        self(line)
    }
}

/// Bounds-checked byte-column slice. Returns `None` when the line is too short or
/// the range does not fall on character boundaries.
#[inline]
pub fn columns(line: &str, start: usize, end: usize) -> Option<&str> {
    line.get(start..end)
}

/// Matches when the text in columns `start..end` equals `token` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMarker {
    pub start: usize,
    pub end: usize,
    pub token: &'static str,
    pub category: Category,
}

impl ColumnMarker {
    pub const fn start(start: usize, end: usize, token: &'static str) -> Self {
        Self {
            start,
            end,
            token,
            category: Category::SectionStart,
        }
    }

    pub const fn boundary(start: usize, end: usize, token: &'static str) -> Self {
        Self {
            start,
            end,
            token,
            category: Category::SectionBoundary,
        }
    }
}

impl LineClassifier for ColumnMarker {
    fn classify(&self, line: &str) -> Category {
        match columns(line, self.start, self.end) {
            Some(text) if text == self.token => self.category,
            _ => Category::Ignored,
        }
    }
}

/// Matches when the line starts with `prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMarker {
    pub prefix: &'static str,
    pub category: Category,
}

impl PrefixMarker {
    pub const fn new(prefix: &'static str, category: Category) -> Self {
        Self { prefix, category }
    }

    pub fn matches(&self, line: &str) -> bool {
        line.starts_with(self.prefix)
    }
}

impl LineClassifier for PrefixMarker {
    fn classify(&self, line: &str) -> Category {
        if self.matches(line) {
            self.category
        } else {
            Category::Ignored
        }
    }
}

/// Matches when the first whitespace-delimited token equals `token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstTokenMarker {
    pub token: &'static str,
    pub category: Category,
}

impl FirstTokenMarker {
    pub const fn start(token: &'static str) -> Self {
        Self {
            token,
            category: Category::SectionStart,
        }
    }

    pub const fn boundary(token: &'static str) -> Self {
        Self {
            token,
            category: Category::SectionBoundary,
        }
    }
}

impl LineClassifier for FirstTokenMarker {
    fn classify(&self, line: &str) -> Category {
        match line.split_whitespace().next() {
            Some(first) if first == self.token => self.category,
            _ => Category::Ignored,
        }
    }
}
