//! Plain data records produced by the readers and the sectioned log parser.
//!
//! Every record here is built once and then treated as immutable: sections are
//! sealed by the accumulator, frames are completed by the xyz reader, and rows are
//! finished by the GBSA reader before being handed out.

pub mod decomposition;
pub mod frame;
pub mod scan;
pub mod section;
pub mod surface;
