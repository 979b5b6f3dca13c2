use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;



static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connect to the database named by `DATABASE_URL`, migrating once per process.
///
/// Returns `None` when no database is configured or `SKIP_DB_TESTS` is set,
/// so the suite stays green on machines without Postgres.
pub(crate) async fn setup_test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let cfg = configs::DatabaseConfig::from_env();
    if cfg.url.trim().is_empty() {
        eprintln!("DATABASE_URL missing; skipping database tests");
        return Ok(None);
    }

    let cfg_for_migrate = cfg.clone();
    MIGRATED
        .get_or_try_init(|| async move {
            let db = crate::db::connect_and_migrate(&cfg_for_migrate, true).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    Ok(Some(crate::db::connect_with_config(&cfg).await?))
}

pub(crate) fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
