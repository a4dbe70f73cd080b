//! Readers and writers for the text formats handled by QMScan.
//!
//! Each reader implements [`traits::LogFile`] so it can consume any buffered
//! reader or a file path. Writers produce CSV tables ([`tables`]) and plain-text
//! section dumps ([`terachem::write_section_dump`]).

pub mod gbsa;
pub mod orca;
pub mod tables;
pub mod terachem;
pub mod traits;
pub mod xyz;
