//! Store implementations behind `AccountRepository` and `PhraseRepository`.

pub mod memory;
pub mod seaorm;

pub use memory::MemoryStore;
pub use seaorm::SeaOrmStore;
