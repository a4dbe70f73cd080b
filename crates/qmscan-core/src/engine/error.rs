use super::config::ConfigError;
use super::extractor::FieldError;
use crate::core::io::gbsa::GbsaError;
use crate::core::io::orca::OrcaError;
use crate::core::io::terachem::TeraChemError;
use crate::core::io::xyz::XyzError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to open '{path}': {source}", path = path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Invalid position index: {0}")]
    InvalidPositionIndex(String),

    #[error("TeraChem log error in '{path}': {source}", path = path.display())]
    TeraChem {
        path: PathBuf,
        #[source]
        source: TeraChemError,
    },

    #[error("Trajectory error in '{path}': {source}", path = path.display())]
    Xyz {
        path: PathBuf,
        #[source]
        source: XyzError,
    },

    #[error("ORCA output error in '{path}': {source}", path = path.display())]
    Orca {
        path: PathBuf,
        #[source]
        source: OrcaError,
    },

    #[error("GBSA output error in '{path}': {source}", path = path.display())]
    Gbsa {
        path: PathBuf,
        #[source]
        source: GbsaError,
    },

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Missing data: {0}")]
    MissingData(String),
}
