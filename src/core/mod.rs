//! Capability traits shared by the matrix types and the codec.

pub mod traits;
pub mod wrappers;
