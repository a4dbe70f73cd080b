use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq)]
pub struct AtomCoordinate {
    /// 1-based position of the atom within its frame.
    pub serial: usize,
    pub element: String,
    pub position: Point3<f64>,
}

/// A single snapshot of an xyz trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame number within the trajectory.
    pub index: usize,
    pub comment: String,
    /// 1-based line number of the comment within the source file.
    pub comment_line: usize,
    pub atoms: Vec<AtomCoordinate>,
}

impl Frame {
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atom(&self, serial: usize) -> Option<&AtomCoordinate> {
        serial.checked_sub(1).and_then(|i| self.atoms.get(i))
    }
}

/// Energy and reaction-coordinate distances measured on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMeasurement {
    pub frame: usize,
    pub energy_hartree: f64,
    pub relative_energy_kcal_mol: f64,
    /// One entry per reaction coordinate, `None` when no atom pair completed.
    pub distances: Vec<Option<f64>>,
}
