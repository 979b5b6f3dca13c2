//! Phrase registry: per-account key/value text entries.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::PhraseRegistry;
