use std::sync::Arc;

use configs::{AppConfig, StoreBackend};
use tracing::info;

use crate::accounts::repository::AccountRepository;
use crate::phrases::repository::PhraseRepository;
use crate::repo::{MemoryStore, SeaOrmStore};

/// The configured persistence backend, shared by the account directory and
/// the phrase registry.
#[derive(Clone)]
pub enum Store {
    Postgres(Arc<SeaOrmStore>),
    Memory(Arc<MemoryStore>),
}

impl Store {
    /// Open the backend named by `cfg.store.backend`.
    pub async fn open(cfg: &AppConfig) -> anyhow::Result<Self> {
        match cfg.store.backend {
            StoreBackend::Postgres => {
                let db = models::db::connect_and_migrate(&cfg.database, cfg.store.run_migrations).await?;
                info!(backend = "postgres", "store_opened");
                Ok(Store::Postgres(Arc::new(SeaOrmStore::new(db))))
            }
            StoreBackend::Memory => {
                info!(backend = "memory", "store_opened");
                Ok(Store::memory())
            }
        }
    }

    pub fn memory() -> Self {
        Store::Memory(Arc::new(MemoryStore::default()))
    }

    pub fn backend(&self) -> StoreBackend {
        match self {
            Store::Postgres(_) => StoreBackend::Postgres,
            Store::Memory(_) => StoreBackend::Memory,
        }
    }

    pub fn accounts(&self) -> Arc<dyn AccountRepository> {
        match self {
            Store::Postgres(s) => s.clone(),
            Store::Memory(s) => s.clone(),
        }
    }

    pub fn phrases(&self) -> Arc<dyn PhraseRepository> {
        match self {
            Store::Postgres(s) => s.clone(),
            Store::Memory(s) => s.clone(),
        }
    }
}
