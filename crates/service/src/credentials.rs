//! One-way credential hashing.
//!
//! The directory only ever sees the [`CredentialHasher`] trait; secrets are
//! hashed on registration and verified on login, never compared in plaintext.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;

use crate::errors::RegistryError;

pub trait CredentialHasher: Send + Sync {
    /// Label persisted next to each hash.
    fn algorithm(&self) -> &str;

    /// Salted one-way hash in PHC string format.
    fn hash(&self, secret: &str) -> Result<String, RegistryError>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` cannot be parsed.
    fn verify(&self, secret: &str, hash: &str) -> Result<bool, RegistryError>;
}

/// Argon2id with either the crate defaults or explicit cost parameters.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self { params: Params::default() }
    }
}

impl Argon2Hasher {
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    /// Minimal memory and time cost. Only for tests and benchmarks.
    pub fn low_cost() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .unwrap_or_default();
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn algorithm(&self) -> &str {
        "argon2"
    }

    fn hash(&self, secret: &str) -> Result<String, RegistryError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| RegistryError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, RegistryError> {
        let parsed = PasswordHash::new(hash).map_err(|e| RegistryError::Hash(e.to_string()))?;
        // cost parameters come from the stored hash, not from self
        Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
    }
}

/// Hasher selected by `auth.password_algorithm`.
pub fn hasher_for(cfg: &configs::AuthConfig) -> anyhow::Result<Arc<dyn CredentialHasher>> {
    match cfg.password_algorithm.to_ascii_lowercase().as_str() {
        "argon2" => Ok(Arc::new(Argon2Hasher::default())),
        other => Err(anyhow::anyhow!("unsupported password algorithm `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_secret_and_verifies() {
        let h = Argon2Hasher::low_cost();
        let hash = h.hash("s3cret-pass").unwrap();
        assert_ne!(hash, "s3cret-pass");
        assert!(hash.starts_with("$argon2id$"));
        assert!(h.verify("s3cret-pass", &hash).unwrap());
        assert!(!h.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let h = Argon2Hasher::low_cost();
        assert_ne!(h.hash("same").unwrap(), h.hash("same").unwrap());
    }

    #[test]
    fn verify_accepts_hashes_made_with_other_costs() {
        let hash = Argon2Hasher::low_cost().hash("portable").unwrap();
        assert!(Argon2Hasher::default().verify("portable", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_match() {
        let h = Argon2Hasher::low_cost();
        assert!(matches!(h.verify("anything", "plaintext"), Err(RegistryError::Hash(_))));
    }

    #[test]
    fn hasher_for_rejects_unknown_algorithms() {
        let cfg = configs::AuthConfig { password_algorithm: "bcrypt".into() };
        assert!(hasher_for(&cfg).is_err());
        assert_eq!(hasher_for(&configs::AuthConfig::default()).unwrap().algorithm(), "argon2");
    }
}
