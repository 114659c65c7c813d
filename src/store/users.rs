use sqlx::SqlitePool;

/// Inserts a bare user row and returns its id. Posts and follows reference
/// users by id only; nothing else about a user is modelled here.
pub async fn create_user(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO users (name) VALUES (?1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
}
