use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EntryId = Uuid;

/// Insert input
#[derive(Debug, Clone, Deserialize)]
pub struct PhraseInput {
    pub key: String,
    pub value: String,
}

/// One `(key, value)` pair as listed for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub key: String,
    pub value: String,
}

impl From<models::phrase::Model> for Phrase {
    fn from(m: models::phrase::Model) -> Self {
        Phrase { key: m.key, value: m.value }
    }
}
