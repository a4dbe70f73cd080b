//! # Engine Module
//!
//! The sectioned log parser: a single-pass, stateful scanner that pulls bounded
//! sections out of semi-structured scientific logs and hands back sealed records
//! in logical order.
//!
//! ## Architecture
//!
//! - **Line Classification** ([`classify`]) - Fixed-prefix, fixed-column and
//!   first-token markers mapping a line to a [`classify::Category`]
//! - **Section Accumulation** ([`accumulator`]) - The `Closed -> Open -> Closed`
//!   state machine holding the in-progress record
//! - **Field Extraction** ([`extractor`]) - Bounds-checked numeric fields,
//!   coordinate triples and parity-paired distances
//! - **Record Sequencing** ([`sequencer`]) - Maps raw section boundaries onto
//!   logical scan steps through a [`sequencer::PositionIndex`]
//! - **Scanning** ([`scanner`]) - Composes the above over a line stream
//!
//! Configuration ([`config`]), errors ([`error`]) and progress callbacks
//! ([`progress`]) are shared with the workflows.

pub mod accumulator;
pub mod classify;
pub mod config;
pub mod error;
pub mod extractor;
pub mod progress;
pub mod scanner;
pub mod sequencer;
