use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AccountId = Uuid;

/// Registration input
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub handle: String,
    pub display_name: String,
    pub secret: String,
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("handle", &self.handle)
            .field("display_name", &self.display_name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Login input
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    pub handle: String,
    pub secret: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("handle", &self.handle)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Public projection of an account. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub handle: String,
    pub display_name: String,
}

/// Account row as the stores hand it to the directory.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: AccountId,
    pub handle: String,
    pub display_name: String,
    pub credential_hash: String,
    pub credential_algorithm: String,
}

impl AccountRecord {
    pub fn view(&self) -> AccountView {
        AccountView { id: self.id, handle: self.handle.clone(), display_name: self.display_name.clone() }
    }
}

impl From<AccountRecord> for AccountView {
    fn from(r: AccountRecord) -> Self {
        AccountView { id: r.id, handle: r.handle, display_name: r.display_name }
    }
}

impl From<models::account::Model> for AccountRecord {
    fn from(m: models::account::Model) -> Self {
        AccountRecord {
            id: m.id,
            handle: m.handle,
            display_name: m.display_name,
            credential_hash: m.credential_hash,
            credential_algorithm: m.credential_algorithm,
        }
    }
}

/// Validated, hashed account ready to persist.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub handle: String,
    pub display_name: String,
    pub credential_hash: String,
    pub credential_algorithm: String,
}
