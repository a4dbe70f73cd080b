/// One converged point of a relaxed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanStep {
    /// 1-based scan step number.
    pub step: usize,
    /// Optimizer iterations spent on this step.
    pub iterations: usize,
    /// Running total of iterations up to and including this step.
    pub cumulative: usize,
    pub energy_hartree: Option<f64>,
}
