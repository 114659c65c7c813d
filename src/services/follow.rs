use crate::{errors::PostError, models::FollowedUser};
use async_trait::async_trait;
use dashmap::DashMap;
use sqlx::SqlitePool;
use std::{collections::BTreeSet, sync::Arc};
use tracing::{info, instrument};

/// Supplies the users a given user follows.
#[async_trait]
pub trait FollowService: Send + Sync {
    async fn get_following(&self, user_id: i64) -> Result<Vec<FollowedUser>, PostError>;
}

/// Follow edges stored in the `follows` table.
#[derive(Debug, Clone)]
pub struct SqlFollowService {
    pool: SqlitePool,
}

impl SqlFollowService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records that `follower_id` follows `followee_id`. Repeating it is a no-op.
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<(), PostError> {
        sqlx::query(
            "INSERT OR IGNORE INTO follows (follower_id, followee_id) VALUES (?1, ?2)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await?;

        info!("User {} now follows {}", follower_id, followee_id);
        Ok(())
    }
}

#[async_trait]
impl FollowService for SqlFollowService {
    #[instrument(skip(self))]
    async fn get_following(&self, user_id: i64) -> Result<Vec<FollowedUser>, PostError> {
        let following = sqlx::query_as::<_, FollowedUser>(
            r#"
            SELECT u.id
            FROM follows f
            JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = ?1
            ORDER BY u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(following)
    }
}

/// In-memory follow graph for deployments that keep follows elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StaticFollowGraph {
    edges: Arc<DashMap<i64, BTreeSet<i64>>>,
}

impl StaticFollowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow(&self, follower_id: i64, followee_id: i64) {
        self.edges.entry(follower_id).or_default().insert(followee_id);
    }
}

#[async_trait]
impl FollowService for StaticFollowGraph {
    async fn get_following(&self, user_id: i64) -> Result<Vec<FollowedUser>, PostError> {
        Ok(self
            .edges
            .get(&user_id)
            .map(|ids| ids.iter().map(|&id| FollowedUser { id }).collect())
            .unwrap_or_default())
    }
}
