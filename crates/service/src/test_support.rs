use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connection for store tests, or `None` when no database is configured or
/// `SKIP_DB_TESTS` is set. Migrations run once per test process.
pub async fn get_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let mut cfg = configs::DatabaseConfig::from_env();
    if cfg.url.trim().is_empty() {
        return Ok(None);
    }
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.min(1);

    let migrate_cfg = cfg.clone();
    MIGRATED
        .get_or_try_init(|| async move {
            drop(models::db::connect_and_migrate(&migrate_cfg, true).await?);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    Ok(Some(models::db::connect_with_config(&cfg).await?))
}
