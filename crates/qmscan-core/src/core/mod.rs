//! # Core Module
//!
//! Data models, file format readers and writers, and numeric helpers shared by the
//! engine and the workflows.
//!
//! - **Records** ([`models`]) - Sealed sections, scan steps, trajectory frames,
//!   surface points and decomposition rows
//! - **File I/O** ([`io`]) - Readers for TeraChem, xyz, ORCA and MMGBSA output, and
//!   CSV / section-dump writers
//! - **Utilities** ([`utils`]) - Geometry and energy unit conversion

pub mod io;
pub mod models;
pub mod utils;
