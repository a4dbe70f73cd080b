/// One sealed section of a sectioned log, assigned to its logical step.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRecord {
    /// 1-based logical index (scan step or frame number).
    pub logical_index: usize,
    /// 1-based raw occurrence number of the boundary that opened this section.
    pub raw_section: usize,
    /// Every line of the section, including the boundary line, newline-terminated.
    pub content: String,
    /// Optimized energy of the scan step, in Hartree.
    pub energy: Option<f64>,
}

impl SectionRecord {
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}
