//! # QMScan Core Library
//!
//! Parsers and analysis workflows for the text output of quantum-chemistry and
//! free-energy tools: TeraChem scan logs and population tables, xyz trajectories,
//! ORCA relaxed surface scans and MMGBSA pairwise decompositions.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Plain data models (`SectionRecord`, `Frame`,
//!   `DecompositionRow`), format readers and writers, and small numeric utilities.
//!
//! - **[`engine`]: The Sectioned Log Parser.** A single-pass, stateful scanner built
//!   from a line classifier, a section accumulator, a field extractor and a record
//!   sequencer that assigns raw sections to logical scan steps.
//!
//! - **[`workflows`]: The Public API.** One entry point per analysis. Each workflow
//!   loads its inputs, drives the engine, reports progress and returns a result
//!   struct; writing output files is left to the caller.

pub mod core;
pub mod engine;
pub mod workflows;
