use thiserror::Error;

use models::errors::ModelError;

/// Failure kinds of the account directory and phrase registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid credentials")]
    Unauthorized,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("store error: {0}")]
    Store(String),
}

impl RegistryError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }
    pub fn conflict(entity: &str) -> Self { Self::Conflict(entity.to_string()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RegistryError::Validation(_) => 1001,
            RegistryError::Conflict(_) => 1002,
            RegistryError::NotFound(_) => 1003,
            RegistryError::Unauthorized => 1004,
            RegistryError::Hash(_) => 1101,
            RegistryError::Store(_) => 1200,
        }
    }

    /// Store failures are worth retrying by the caller; nothing else is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::Store(_))
    }
}

impl From<ModelError> for RegistryError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => RegistryError::Validation(msg),
            ModelError::Conflict(entity) => RegistryError::Conflict(entity),
            ModelError::MissingParent(entity) => RegistryError::NotFound(entity),
            ModelError::Db(msg) => RegistryError::Store(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_to_registry_kinds() {
        assert!(matches!(RegistryError::from(ModelError::Conflict("handle".into())), RegistryError::Conflict(_)));
        assert!(matches!(RegistryError::from(ModelError::MissingParent("account".into())), RegistryError::NotFound(_)));
        assert!(matches!(RegistryError::from(ModelError::Db("io".into())), RegistryError::Store(_)));
        assert!(matches!(RegistryError::from(ModelError::Validation("x".into())), RegistryError::Validation(_)));
    }

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(RegistryError::conflict("handle").to_string(), "handle already exists");
        assert_eq!(RegistryError::not_found("phrase").to_string(), "phrase not found");
    }

    #[test]
    fn only_store_errors_are_retryable() {
        assert!(RegistryError::Store("timeout".into()).is_retryable());
        assert!(!RegistryError::Unauthorized.is_retryable());
        assert!(!RegistryError::conflict("handle").is_retryable());
    }
}
