use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Inputs of a TeraChem scan run performed with per-iteration population output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOrganizerConfig {
    /// The main TeraChem log (`qmscript.out`).
    pub output_log: PathBuf,
    /// Mulliken spin populations (`scr/mullpop`).
    pub mullpop: PathBuf,
    /// Mulliken charges (`scr/charge_mull.xls`).
    pub charges: PathBuf,
}

#[derive(Default)]
pub struct ScanOrganizerConfigBuilder {
    output_log: Option<PathBuf>,
    mullpop: Option<PathBuf>,
    charges: Option<PathBuf>,
}

impl ScanOrganizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_log(mut self, path: PathBuf) -> Self {
        self.output_log = Some(path);
        self
    }
    pub fn mullpop(mut self, path: PathBuf) -> Self {
        self.mullpop = Some(path);
        self
    }
    pub fn charges(mut self, path: PathBuf) -> Self {
        self.charges = Some(path);
        self
    }

    pub fn build(self) -> Result<ScanOrganizerConfig, ConfigError> {
        Ok(ScanOrganizerConfig {
            output_log: self
                .output_log
                .ok_or(ConfigError::MissingParameter("output_log"))?,
            mullpop: self.mullpop.ok_or(ConfigError::MissingParameter("mullpop"))?,
            charges: self.charges.ok_or(ConfigError::MissingParameter("charges"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyProfileConfig {
    pub trajectories: Vec<PathBuf>,
    /// Shift every series so that all share the lowest first-frame energy as zero.
    /// Only meaningful with more than one trajectory.
    pub relative_to_lowest: bool,
}

#[derive(Default)]
pub struct EnergyProfileConfigBuilder {
    trajectories: Vec<PathBuf>,
    relative_to_lowest: Option<bool>,
}

impl EnergyProfileConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trajectory(mut self, path: PathBuf) -> Self {
        self.trajectories.push(path);
        self
    }
    pub fn trajectories(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.trajectories.extend(paths);
        self
    }
    pub fn relative_to_lowest(mut self, enabled: bool) -> Self {
        self.relative_to_lowest = Some(enabled);
        self
    }

    pub fn build(self) -> Result<EnergyProfileConfig, ConfigError> {
        if self.trajectories.is_empty() {
            return Err(ConfigError::MissingParameter("trajectories"));
        }
        Ok(EnergyProfileConfig {
            trajectories: self.trajectories,
            relative_to_lowest: self.relative_to_lowest.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrcaScanConfig {
    pub input: PathBuf,
}

impl OrcaScanConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// A distance between atoms of a trajectory, identified by 1-based atom serials.
///
/// Member atoms are paired by order of appearance in the frame; with more than
/// two members the last completed pair wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCoordinate {
    pub label: String,
    pub atoms: Vec<usize>,
}

impl ReactionCoordinate {
    pub fn new(label: impl Into<String>, atoms: Vec<usize>) -> Self {
        Self {
            label: label.into(),
            atoms,
        }
    }

    pub fn contains(&self, serial: usize) -> bool {
        self.atoms.contains(&serial)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NebConfig {
    pub input: PathBuf,
    pub coordinates: Vec<ReactionCoordinate>,
    /// Number of frames to select for the initial NEB path.
    pub image_count: usize,
}

#[derive(Default)]
pub struct NebConfigBuilder {
    input: Option<PathBuf>,
    coordinates: Vec<ReactionCoordinate>,
    image_count: Option<usize>,
}

impl NebConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, path: PathBuf) -> Self {
        self.input = Some(path);
        self
    }
    pub fn coordinate(mut self, coordinate: ReactionCoordinate) -> Self {
        self.coordinates.push(coordinate);
        self
    }
    pub fn image_count(mut self, count: usize) -> Self {
        self.image_count = Some(count);
        self
    }

    pub fn build(self) -> Result<NebConfig, ConfigError> {
        if self.coordinates.is_empty() {
            return Err(ConfigError::MissingParameter("coordinates"));
        }
        if let Some(coord) = self.coordinates.iter().find(|c| c.atoms.len() < 2) {
            return Err(ConfigError::InvalidValue {
                parameter: "coordinates",
                reason: format!("'{}' needs at least two atoms", coord.label),
            });
        }
        let image_count = self
            .image_count
            .ok_or(ConfigError::MissingParameter("image_count"))?;
        if image_count < 2 {
            return Err(ConfigError::InvalidValue {
                parameter: "image_count",
                reason: "a path needs at least two images".to_string(),
            });
        }
        Ok(NebConfig {
            input: self.input.ok_or(ConfigError::MissingParameter("input"))?,
            coordinates: self.coordinates,
            image_count,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GbsaConfig {
    pub inputs: Vec<PathBuf>,
    /// Residue number of the ligand whose contacts are ranked.
    pub ligand_resid: i64,
    pub top_hits: usize,
}

#[derive(Default)]
pub struct GbsaConfigBuilder {
    inputs: Vec<PathBuf>,
    ligand_resid: Option<i64>,
    top_hits: Option<usize>,
}

impl GbsaConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.inputs.extend(paths);
        self
    }
    pub fn ligand_resid(mut self, resid: i64) -> Self {
        self.ligand_resid = Some(resid);
        self
    }
    pub fn top_hits(mut self, n: usize) -> Self {
        self.top_hits = Some(n);
        self
    }

    pub fn build(self) -> Result<GbsaConfig, ConfigError> {
        if self.inputs.is_empty() {
            return Err(ConfigError::MissingParameter("inputs"));
        }
        Ok(GbsaConfig {
            inputs: self.inputs,
            ligand_resid: self
                .ligand_resid
                .ok_or(ConfigError::MissingParameter("ligand_resid"))?,
            top_hits: self
                .top_hits
                .ok_or(ConfigError::MissingParameter("top_hits"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_builder_requires_every_path() {
        let result = ScanOrganizerConfigBuilder::new()
            .output_log("qmscript.out".into())
            .mullpop("scr/mullpop".into())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("charges")));
    }

    #[test]
    fn energy_builder_defaults_to_first_frame_reference() {
        let config = EnergyProfileConfigBuilder::new()
            .trajectory("a.xyz".into())
            .build()
            .unwrap();
        assert!(!config.relative_to_lowest);
        assert_eq!(config.trajectories.len(), 1);
    }

    #[test]
    fn energy_builder_rejects_empty_input_list() {
        let result = EnergyProfileConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("trajectories")));
    }

    #[test]
    fn neb_builder_rejects_single_atom_coordinate() {
        let result = NebConfigBuilder::new()
            .input("optim.xyz".into())
            .coordinate(ReactionCoordinate::new("coord1", vec![5]))
            .image_count(10)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "coordinates",
                ..
            })
        ));
    }

    #[test]
    fn neb_builder_accepts_complete_configuration() {
        let config = NebConfigBuilder::new()
            .input("optim.xyz".into())
            .coordinate(ReactionCoordinate::new("coord1", vec![123, 128]))
            .coordinate(ReactionCoordinate::new("coord2", vec![128, 138]))
            .image_count(20)
            .build()
            .unwrap();
        assert_eq!(config.coordinates.len(), 2);
        assert!(config.coordinates[1].contains(138));
    }

    #[test]
    fn gbsa_builder_requires_ligand() {
        let result = GbsaConfigBuilder::new()
            .inputs(vec![PathBuf::from("x_24.dat")])
            .top_hits(5)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("ligand_resid")));
    }
}
