use std::sync::Arc;

use models::account;
use tracing::{debug, info, instrument, warn};

use super::domain::{AccountId, AccountView, LoginInput, NewAccount, RegisterInput};
use super::repository::AccountRepository;
use crate::credentials::CredentialHasher;
use crate::errors::RegistryError;

/// Account directory independent of web framework and storage backend.
pub struct AccountDirectory<R: AccountRepository + ?Sized = dyn AccountRepository> {
    repo: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<R: AccountRepository + ?Sized> AccountDirectory<R> {
    pub fn new(repo: Arc<R>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Register a new account with a hashed secret.
    ///
    /// The handle check and the write are one store operation, so of two
    /// concurrent registrations for the same handle exactly one succeeds.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::accounts::{AccountDirectory, domain::RegisterInput};
    /// use service::credentials::Argon2Hasher;
    /// use service::repo::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let dir = AccountDirectory::new(store, Arc::new(Argon2Hasher::low_cost()));
    /// let input = RegisterInput { handle: "ana".into(), display_name: "Ana".into(), secret: "pw".into() };
    /// let id = tokio_test::block_on(dir.register(input.clone())).unwrap();
    /// assert!(!id.is_nil());
    /// assert!(tokio_test::block_on(dir.register(input)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(handle = %input.handle))]
    pub async fn register(&self, input: RegisterInput) -> Result<AccountId, RegistryError> {
        let handle = account::validate_handle(&input.handle)?;
        let display_name = account::validate_display_name(&input.display_name)?;
        if input.secret.is_empty() {
            return Err(RegistryError::Validation("secret required".into()));
        }

        let credential_hash = self.hash_secret(input.secret).await?;
        let new = NewAccount {
            handle,
            display_name,
            credential_hash,
            credential_algorithm: self.hasher.algorithm().to_string(),
        };
        let created = self.repo.insert_account(new).await.map_err(|e| {
            if matches!(e, RegistryError::Conflict(_)) {
                debug!("handle already registered");
            }
            e
        })?;

        info!(account_id = %created.id, handle = %created.handle, "account_registered");
        Ok(created.id)
    }

    /// Check a secret against the stored hash.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::accounts::{AccountDirectory, domain::{LoginInput, RegisterInput}};
    /// use service::credentials::Argon2Hasher;
    /// use service::errors::RegistryError;
    /// use service::repo::memory::MemoryStore;
    ///
    /// let dir = AccountDirectory::new(Arc::new(MemoryStore::default()), Arc::new(Argon2Hasher::low_cost()));
    /// let reg = RegisterInput { handle: "bia".into(), display_name: "Bia".into(), secret: "Passw0rd".into() };
    /// tokio_test::block_on(dir.register(reg)).unwrap();
    /// let view = tokio_test::block_on(dir.authenticate(LoginInput { handle: "bia".into(), secret: "Passw0rd".into() })).unwrap();
    /// assert_eq!(view.display_name, "Bia");
    /// let bad = tokio_test::block_on(dir.authenticate(LoginInput { handle: "bia".into(), secret: "nope".into() }));
    /// assert!(matches!(bad, Err(RegistryError::Unauthorized)));
    /// ```
    #[instrument(skip(self, input), fields(handle = %input.handle))]
    pub async fn authenticate(&self, input: LoginInput) -> Result<AccountView, RegistryError> {
        let record = self
            .repo
            .find_account_by_handle(input.handle.trim())
            .await?
            .ok_or_else(|| RegistryError::not_found("account"))?;

        if !self.verify_secret(input.secret, record.credential_hash.clone()).await? {
            warn!(account_id = %record.id, "credential_mismatch");
            return Err(RegistryError::Unauthorized);
        }
        debug!(account_id = %record.id, "authenticated");
        Ok(record.into())
    }

    pub async fn get(&self, id: AccountId) -> Result<AccountView, RegistryError> {
        self.repo
            .find_account(id)
            .await?
            .map(AccountView::from)
            .ok_or_else(|| RegistryError::not_found("account"))
    }

    /// All accounts, oldest first. The order is a convenience, not a contract.
    pub async fn list(&self) -> Result<Vec<AccountView>, RegistryError> {
        let rows = self.repo.list_accounts().await?;
        Ok(rows.into_iter().map(AccountView::from).collect())
    }

    /// Destroy every account together with its phrases.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RegistryError> {
        let count = self.repo.delete_all_accounts().await?;
        warn!(count, "all_accounts_deleted");
        Ok(count)
    }

    async fn hash_secret(&self, secret: String) -> Result<String, RegistryError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| RegistryError::Hash(e.to_string()))?
    }

    async fn verify_secret(&self, secret: String, hash: String) -> Result<bool, RegistryError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &hash))
            .await
            .map_err(|e| RegistryError::Hash(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Argon2Hasher;
    use crate::repo::memory::MemoryStore;

    fn directory() -> AccountDirectory {
        let store: Arc<dyn AccountRepository> = Arc::new(MemoryStore::default());
        AccountDirectory::new(store, Arc::new(Argon2Hasher::low_cost()))
    }

    fn reg(handle: &str, secret: &str) -> RegisterInput {
        RegisterInput { handle: handle.into(), display_name: format!("{handle} name"), secret: secret.into() }
    }

    fn login(handle: &str, secret: &str) -> LoginInput {
        LoginInput { handle: handle.into(), secret: secret.into() }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let dir = directory();
        let id = dir.register(reg("ana", "pw-ana")).await.unwrap();
        let view = dir.authenticate(login("ana", "pw-ana")).await.unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.handle, "ana");
        assert_eq!(view.display_name, "ana name");
    }

    #[tokio::test]
    async fn duplicate_handle_conflicts() {
        let dir = directory();
        dir.register(reg("ana", "one")).await.unwrap();
        let err = dir.register(reg("ana", "two")).await.unwrap_err();
        assert!(matches!(err, RegistryError::Conflict(_)));
        assert_eq!(dir.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn handle_is_trimmed_before_uniqueness_check() {
        let dir = directory();
        dir.register(reg("ana", "one")).await.unwrap();
        assert!(matches!(dir.register(reg("  ana ", "two")).await, Err(RegistryError::Conflict(_))));
        assert!(dir.authenticate(login(" ana", "one")).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_secret_is_unauthorized() {
        let dir = directory();
        dir.register(reg("ana", "right")).await.unwrap();
        assert!(matches!(dir.authenticate(login("ana", "wrong")).await, Err(RegistryError::Unauthorized)));
    }

    #[tokio::test]
    async fn unknown_handle_is_not_found() {
        let dir = directory();
        assert!(matches!(dir.authenticate(login("ghost", "x")).await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_hashing() {
        let dir = directory();
        assert!(matches!(dir.register(reg("", "pw")).await, Err(RegistryError::Validation(_))));
        assert!(matches!(dir.register(reg("ana", "")).await, Err(RegistryError::Validation(_))));
        let blank_name = RegisterInput { handle: "ana".into(), display_name: " ".into(), secret: "pw".into() };
        assert!(matches!(dir.register(blank_name).await, Err(RegistryError::Validation(_))));
        assert!(dir.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_views_in_registration_order() {
        let dir = directory();
        for h in ["c", "a", "b"] {
            dir.register(reg(h, "pw")).await.unwrap();
        }
        let handles: Vec<_> = dir.list().await.unwrap().into_iter().map(|v| v.handle).collect();
        assert_eq!(handles, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn get_by_id() {
        let dir = directory();
        let id = dir.register(reg("ana", "pw")).await.unwrap();
        assert_eq!(dir.get(id).await.unwrap().handle, "ana");
        assert!(matches!(dir.get(uuid::Uuid::new_v4()).await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_all_reports_count_and_frees_handles() {
        let dir = directory();
        dir.register(reg("a", "pw")).await.unwrap();
        dir.register(reg("b", "pw")).await.unwrap();
        assert_eq!(dir.delete_all().await.unwrap(), 2);
        assert!(dir.list().await.unwrap().is_empty());
        assert_eq!(dir.delete_all().await.unwrap(), 0);
        dir.register(reg("a", "pw")).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registration_has_one_winner() {
        let dir = Arc::new(directory());
        let barrier = Arc::new(tokio::sync::Barrier::new(16));
        let mut tasks = Vec::new();
        for i in 0..16 {
            let dir = Arc::clone(&dir);
            let barrier = Arc::clone(&barrier);
            tasks.push(tokio::spawn(async move {
                barrier.wait().await;
                dir.register(reg("contended", &format!("pw{i}"))).await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for t in tasks {
            match t.await.unwrap() {
                Ok(_) => ok += 1,
                Err(RegistryError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!((ok, conflicts), (1, 15));
        assert_eq!(dir.list().await.unwrap().len(), 1);
    }
}
