//! Persistence entities for the phrase registry.
//!
//! Each entity module owns its validation rules and the single-statement
//! writes the service layer builds on.

pub mod errors;
pub mod db;
pub mod account;
pub mod phrase;

#[cfg(test)]
mod tests;
