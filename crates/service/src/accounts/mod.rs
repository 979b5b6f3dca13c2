//! Account directory: registration, credential checks and the bulk clear.
//!
//! Three layers as elsewhere in this crate: plain domain types, a repository
//! trait the stores implement, and the service holding the business rules.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::AccountDirectory;
