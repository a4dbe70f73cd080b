use serde::Serialize;

/// Number of comma-separated fields in a DELTAS data row.
pub const DECOMPOSITION_FIELD_COUNT: usize = 22;

/// Average, standard deviation and standard deviation of the mean of one term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub avg: f64,
    pub sd: f64,
    pub sdm: f64,
}

/// One residue pair of an MMGBSA pairwise decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionRow {
    pub resname_1: String,
    pub resid_1: i64,
    pub resname_2: String,
    pub resid_2: i64,
    pub internal: EnergyTerm,
    pub vdw: EnergyTerm,
    pub electrostatic: EnergyTerm,
    pub polar: EnergyTerm,
    pub non_polar: EnergyTerm,
    pub total: EnergyTerm,
}

impl DecompositionRow {
    /// Label of the partner residue, e.g. `HIS125`.
    pub fn residue_label(&self) -> String {
        format!("{}{}", self.resname_2, self.resid_2)
    }

    pub fn is_self_pair(&self) -> bool {
        self.resid_1 == self.resid_2
    }
}

/// Flat, column-ordered view of a [`DecompositionRow`] used for CSV output.
#[derive(Debug, Serialize)]
pub struct DecompositionCsvRow<'a> {
    #[serde(rename = "Resname 1")]
    pub resname_1: &'a str,
    #[serde(rename = "Resid 1")]
    pub resid_1: i64,
    #[serde(rename = "Resname 2")]
    pub resname_2: &'a str,
    #[serde(rename = "Resid 2")]
    pub resid_2: i64,
    #[serde(rename = "Residue")]
    pub residue: String,
    #[serde(rename = "Internal")]
    pub internal: f64,
    #[serde(rename = "Internal SD")]
    pub internal_sd: f64,
    #[serde(rename = "Internal SDM")]
    pub internal_sdm: f64,
    #[serde(rename = "VDW")]
    pub vdw: f64,
    #[serde(rename = "VDW SD")]
    pub vdw_sd: f64,
    #[serde(rename = "VDW SDM")]
    pub vdw_sdm: f64,
    #[serde(rename = "Electrostatic")]
    pub electrostatic: f64,
    #[serde(rename = "Electrostatic SD")]
    pub electrostatic_sd: f64,
    #[serde(rename = "Electrostatic SDM")]
    pub electrostatic_sdm: f64,
    #[serde(rename = "Polar")]
    pub polar: f64,
    #[serde(rename = "Polar SD")]
    pub polar_sd: f64,
    #[serde(rename = "Polar SDM")]
    pub polar_sdm: f64,
    #[serde(rename = "Non-polar")]
    pub non_polar: f64,
    #[serde(rename = "Non-polar SD")]
    pub non_polar_sd: f64,
    #[serde(rename = "Non-polar SDM")]
    pub non_polar_sdm: f64,
    #[serde(rename = "Total")]
    pub total: f64,
    #[serde(rename = "Total SD")]
    pub total_sd: f64,
    #[serde(rename = "Total SDM")]
    pub total_sdm: f64,
}

impl<'a> From<&'a DecompositionRow> for DecompositionCsvRow<'a> {
    fn from(row: &'a DecompositionRow) -> Self {
        Self {
            resname_1: &row.resname_1,
            resid_1: row.resid_1,
            resname_2: &row.resname_2,
            resid_2: row.resid_2,
            residue: row.residue_label(),
            internal: row.internal.avg,
            internal_sd: row.internal.sd,
            internal_sdm: row.internal.sdm,
            vdw: row.vdw.avg,
            vdw_sd: row.vdw.sd,
            vdw_sdm: row.vdw.sdm,
            electrostatic: row.electrostatic.avg,
            electrostatic_sd: row.electrostatic.sd,
            electrostatic_sdm: row.electrostatic.sdm,
            polar: row.polar.avg,
            polar_sd: row.polar.sd,
            polar_sdm: row.polar.sdm,
            non_polar: row.non_polar.avg,
            non_polar_sd: row.non_polar.sd,
            non_polar_sdm: row.non_polar.sdm,
            total: row.total.avg,
            total_sd: row.total.sd,
            total_sdm: row.total.sdm,
        }
    }
}
