//! Shared plumbing for the phrasebook crates: logging setup and wire types
//! that do not belong to a single layer.

pub mod types;
pub mod utils;
