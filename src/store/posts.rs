use crate::{
    errors::PostError,
    models::{NewPost, Post},
};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

const POST_COLUMNS: &str = "p.id, p.user_id, p.text, p.location, p.hashtags, p.date_time";

/// Well under SQLite's default limit of 32766 bound variables.
const IDS_PER_QUERY: usize = 10_000;

/// Direct queries against the `posts` table.
///
/// Lists are ordered newest first; posts sharing a timestamp fall back to
/// descending id so a later insert always sorts ahead.
#[derive(Debug, Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Post>, PostError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = ?1
            ORDER BY p.date_time DESC, p.id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        non_empty(posts, "No posts were found")
    }

    /// Removes `post_id` if `user_id` owns it.
    ///
    /// The ownership check is part of the DELETE itself; the follow-up read
    /// only runs when nothing was removed, to tell a missing post from
    /// someone else's.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: i64, post_id: i64) -> Result<(), PostError> {
        let removed = sqlx::query("DELETE FROM posts WHERE id = ?1 AND user_id = ?2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if removed > 0 {
            return Ok(());
        }

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM posts WHERE id = ?1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        match exists {
            Some(_) => Err(PostError::Forbidden),
            None => Err(PostError::NotFound("Post not found")),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_by_location(&self, location: &str) -> Result<Vec<Post>, PostError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            WHERE p.location = ?1
            ORDER BY p.date_time DESC, p.id DESC
            "#
        ))
        .bind(location)
        .fetch_all(&self.pool)
        .await?;

        non_empty(posts, "No posts found for this location")
    }

    /// Case-insensitive substring match on the hashtags field, compared
    /// against the copy folded with [`fold_case`] at insert time.
    #[instrument(skip(self))]
    pub async fn list_by_hashtag(&self, hashtag: &str) -> Result<Vec<Post>, PostError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            WHERE instr(p.hashtags_folded, ?1) > 0
            ORDER BY p.date_time DESC, p.id DESC
            "#
        ))
        .bind(fold_case(hashtag))
        .fetch_all(&self.pool)
        .await?;

        non_empty(posts, "No posts found for this hashtag")
    }

    #[instrument(skip(self, post))]
    pub async fn create(&self, user_id: i64, post: NewPost) -> Result<Post, PostError> {
        self.insert(user_id, post, Utc::now()).await
    }

    pub(crate) async fn insert(
        &self,
        user_id: i64,
        post: NewPost,
        date_time: DateTime<Utc>,
    ) -> Result<Post, PostError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, text, location, hashtags, hashtags_folded, date_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, user_id, text, location, hashtags, date_time
            "#,
        )
        .bind(user_id)
        .bind(post.text)
        .bind(post.location)
        .bind(post.hashtags.as_deref())
        .bind(post.hashtags.as_deref().map(fold_case))
        .bind(date_time)
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted post {} for user {}", post.id, user_id);
        Ok(post)
    }

    /// All posts owned by any of `user_ids`, unordered. Ids are bound in
    /// chunks of [`IDS_PER_QUERY`] to stay under SQLite's variable limit.
    #[instrument(skip(self), fields(users = user_ids.len()))]
    pub async fn list_by_users(&self, user_ids: &[i64]) -> Result<Vec<Post>, PostError> {
        let mut posts = Vec::new();

        for chunk in user_ids.chunks(IDS_PER_QUERY) {
            let mut query = QueryBuilder::<Sqlite>::new(format!(
                "SELECT {POST_COLUMNS} FROM posts p WHERE p.user_id IN ("
            ));
            let mut ids = query.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");

            posts.extend(
                query
                    .build_query_as::<Post>()
                    .fetch_all(&self.pool)
                    .await?,
            );
        }

        Ok(posts)
    }
}

fn non_empty(posts: Vec<Post>, message: &'static str) -> Result<Vec<Post>, PostError> {
    if posts.is_empty() {
        Err(PostError::NotFound(message))
    } else {
        Ok(posts)
    }
}

/// Unicode lowercase used on both sides of the hashtag match.
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
