use qmscan::engine::config as core_config;
use std::path::PathBuf;

pub struct ScanAppConfig {
    pub core_config: core_config::ScanOrganizerConfig,
    pub spin_output: PathBuf,
    pub charge_output: PathBuf,
    pub summary_output: PathBuf,
}

pub struct EnergyAppConfig {
    pub core_config: core_config::EnergyProfileConfig,
    pub output: PathBuf,
}

pub struct OrcaScanAppConfig {
    pub core_config: core_config::OrcaScanConfig,
    pub output: PathBuf,
}

pub struct NebAppConfig {
    pub core_config: core_config::NebConfig,
    pub output: PathBuf,
    pub path_output: PathBuf,
}

pub struct GbsaAppConfig {
    pub core_config: core_config::GbsaConfig,
    pub output_dir: PathBuf,
}
