pub const HARTREE_TO_KCAL_MOL: f64 = 627.509;

#[inline]
pub fn hartree_to_kcal_mol(energy_hartree: f64) -> f64 {
    energy_hartree * HARTREE_TO_KCAL_MOL
}

/// Converts a series of Hartree energies to kcal/mol relative to its first entry.
///
/// The first element of the result is always exactly zero.
pub fn relative_kcal_mol(energies_hartree: &[f64]) -> Vec<f64> {
    let Some(&reference) = energies_hartree.first() else {
        return Vec::new();
    };
    energies_hartree
        .iter()
        .map(|&e| (e - reference) * HARTREE_TO_KCAL_MOL)
        .collect()
}
