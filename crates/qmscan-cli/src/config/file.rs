use crate::error::{CliError, Result};
use crate::utils::parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScanConfig {
    pub output_log: Option<PathBuf>,
    pub mullpop: Option<PathBuf>,
    pub charges: Option<PathBuf>,
    pub spin_output: Option<PathBuf>,
    pub charge_output: Option<PathBuf>,
    pub summary_output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEnergyConfig {
    pub relative_to_lowest: Option<bool>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOrcaScanConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileNebConfig {
    pub input: Option<PathBuf>,
    /// Atom lists, one per reaction coordinate (e.g. `"123,128"`).
    pub coordinates: Option<Vec<String>>,
    pub images: Option<usize>,
    pub output: Option<PathBuf>,
    pub path_output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGbsaConfig {
    pub pattern_suffix: Option<String>,
    pub ligand_resid: Option<i64>,
    pub top_hits: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

/// Layout of the TOML configuration file. Every section and key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub scan: Option<FileScanConfig>,
    pub energy: Option<FileEnergyConfig>,
    pub orca_scan: Option<FileOrcaScanConfig>,
    pub neb: Option<FileNebConfig>,
    pub gbsa: Option<FileGbsaConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration, then
    /// applies the `-S` overrides.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            debug!("Applying override {} = {}", key, value);

            match key {
                "scan.output-log" => self.scan().output_log = Some(value.into()),
                "scan.mullpop" => self.scan().mullpop = Some(value.into()),
                "scan.charges" => self.scan().charges = Some(value.into()),
                "scan.spin-output" => self.scan().spin_output = Some(value.into()),
                "scan.charge-output" => self.scan().charge_output = Some(value.into()),
                "scan.summary-output" => self.scan().summary_output = Some(value.into()),
                "energy.relative-to-lowest" => {
                    self.energy().relative_to_lowest = Some(parse_value(key, value)?)
                }
                "energy.output" => self.energy().output = Some(value.into()),
                "orca-scan.input" => self.orca_scan().input = Some(value.into()),
                "orca-scan.output" => self.orca_scan().output = Some(value.into()),
                "neb.input" => self.neb().input = Some(value.into()),
                "neb.coordinates" => {
                    self.neb().coordinates =
                        Some(value.split(';').map(|s| s.trim().to_string()).collect())
                }
                "neb.images" => self.neb().images = Some(parse_value(key, value)?),
                "neb.output" => self.neb().output = Some(value.into()),
                "neb.path-output" => self.neb().path_output = Some(value.into()),
                "gbsa.pattern-suffix" => self.gbsa().pattern_suffix = Some(value.to_string()),
                "gbsa.ligand-resid" => self.gbsa().ligand_resid = Some(parse_value(key, value)?),
                "gbsa.top-hits" => self.gbsa().top_hits = Some(parse_value(key, value)?),
                "gbsa.output-dir" => self.gbsa().output_dir = Some(value.into()),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn scan(&mut self) -> &mut FileScanConfig {
        self.scan.get_or_insert_with(Default::default)
    }
    fn energy(&mut self) -> &mut FileEnergyConfig {
        self.energy.get_or_insert_with(Default::default)
    }
    fn orca_scan(&mut self) -> &mut FileOrcaScanConfig {
        self.orca_scan.get_or_insert_with(Default::default)
    }
    fn neb(&mut self) -> &mut FileNebConfig {
        self.neb.get_or_insert_with(Default::default)
    }
    fn gbsa(&mut self) -> &mut FileGbsaConfig {
        self.gbsa.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}
