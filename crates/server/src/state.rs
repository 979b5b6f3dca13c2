use std::sync::Arc;

use service::accounts::AccountDirectory;
use service::credentials::CredentialHasher;
use service::phrases::PhraseRegistry;
use service::Store;

/// Shared handler state. Both components sit on the same store.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountDirectory>,
    pub phrases: Arc<PhraseRegistry>,
}

impl AppState {
    pub fn new(store: &Store, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            accounts: Arc::new(AccountDirectory::new(store.accounts(), hasher)),
            phrases: Arc::new(PhraseRegistry::new(store.phrases())),
        }
    }
}
