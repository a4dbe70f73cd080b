/// A single point of a relaxed potential energy surface scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub coordinate: f64,
    pub energy_hartree: f64,
}
