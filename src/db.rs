use crate::store::fold_case;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::info;

/// Open a pool against `database_url`, creating the file if needed, and
/// apply the bootstrap schema.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    info!("Database ready at {}", database_url);
    Ok(pool)
}

/// Single-connection in-memory database. Every connection to `:memory:` is
/// a distinct database, so the pool must never open a second one or
/// recycle the first.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    backfill_folded_hashtags(pool).await?;
    Ok(())
}

/// Rows written before `hashtags_folded` existed get their folded copy here,
/// since SQLite's own `lower()` only folds ASCII.
async fn backfill_folded_hashtags(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let pending: Vec<(i64, String)> = sqlx::query_as(
        "SELECT id, hashtags FROM posts WHERE hashtags IS NOT NULL AND hashtags_folded IS NULL",
    )
    .fetch_all(pool)
    .await?;

    if pending.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for (id, hashtags) in &pending {
        sqlx::query("UPDATE posts SET hashtags_folded = ?1 WHERE id = ?2")
            .bind(fold_case(hashtags))
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!("Folded hashtags for {} existing posts", pending.len());
    Ok(())
}

/// Liveness probe used by `/health`.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
