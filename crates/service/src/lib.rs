//! Service layer of the phrase registry.
//! - `accounts`: account directory (register, authenticate, list, bulk delete).
//! - `phrases`: per-account key/value entries.
//! - `repo` and `store`: persistence behind repository traits, Postgres or in-memory.
//! - `credentials`: one-way secret hashing.

pub mod errors;
pub mod credentials;
pub mod accounts;
pub mod phrases;
pub mod repo;
pub mod store;
#[cfg(test)]
pub mod test_support;

pub use errors::RegistryError;
pub use store::Store;
