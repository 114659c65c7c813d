use crate::{errors::PostError, models::Post, services::FollowService, store::PostStore};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Builds a user's feed from the posts of everyone they follow.
#[derive(Clone)]
pub struct FeedAggregator {
    store: PostStore,
    follows: Arc<dyn FollowService>,
}

impl FeedAggregator {
    pub fn new(store: PostStore, follows: Arc<dyn FollowService>) -> Self {
        Self { store, follows }
    }

    /// Followees' posts, newest first, fetched by followee set rather than
    /// one query per followee. Following nobody yields an empty feed.
    #[instrument(skip(self))]
    pub async fn get_feed(&self, user_id: i64) -> Result<Vec<Post>, PostError> {
        let mut followee_ids: Vec<i64> = self
            .follows
            .get_following(user_id)
            .await?
            .into_iter()
            .map(|user| user.id)
            .collect();
        followee_ids.sort_unstable();
        followee_ids.dedup();

        let mut posts = self.store.list_by_users(&followee_ids).await?;
        sort_newest_first(&mut posts);

        debug!(
            "Feed for user {}: {} posts from {} followees",
            user_id,
            posts.len(),
            followee_ids.len()
        );
        Ok(posts)
    }
}

/// Descending timestamp, then descending id for posts sharing a timestamp.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date_time.cmp(&a.date_time).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db,
        models::NewPost,
        services::{SqlFollowService, StaticFollowGraph},
        store::users,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn post(id: i64, minute: u32) -> Post {
        Post {
            id,
            user_id: 1,
            text: format!("post {id}"),
            location: None,
            hashtags: None,
            date_time: Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn sort_orders_by_time_then_id() {
        let mut posts = vec![post(1, 5), post(2, 30), post(3, 5), post(4, 10)];
        sort_newest_first(&mut posts);
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[tokio::test]
    async fn feed_merges_followees_newest_first() {
        let pool = db::connect_in_memory().await.unwrap();
        let reader = users::create_user(&pool, "reader").await.unwrap();
        let a = users::create_user(&pool, "a").await.unwrap();
        let b = users::create_user(&pool, "b").await.unwrap();
        let stranger = users::create_user(&pool, "stranger").await.unwrap();

        let store = PostStore::new(pool.clone());
        let base = Utc::now() - Duration::hours(1);
        let at = |minutes: i64| base + Duration::minutes(minutes);

        // A's posts are inserted newest first, B's oldest first.
        let a3 = store.insert(a, NewPost::new("a3", None, None), at(50)).await.unwrap();
        let a1 = store.insert(a, NewPost::new("a1", None, None), at(10)).await.unwrap();
        let b0 = store.insert(b, NewPost::new("b0", None, None), at(0)).await.unwrap();
        let b2 = store.insert(b, NewPost::new("b2", None, None), at(30)).await.unwrap();
        let b4 = store.insert(b, NewPost::new("b4", None, None), at(55)).await.unwrap();
        store
            .insert(stranger, NewPost::new("hidden", None, None), at(59))
            .await
            .unwrap();

        let follows = SqlFollowService::new(pool);
        follows.follow(reader, a).await.unwrap();
        follows.follow(reader, b).await.unwrap();

        let feed = FeedAggregator::new(store, Arc::new(follows));
        let posts = feed.get_feed(reader).await.unwrap();

        assert_eq!(posts, vec![b4, a3, b2, a1, b0]);
    }

    #[tokio::test]
    async fn followees_without_posts_contribute_nothing() {
        let pool = db::connect_in_memory().await.unwrap();
        let reader = users::create_user(&pool, "reader").await.unwrap();
        let quiet = users::create_user(&pool, "quiet").await.unwrap();
        let loud = users::create_user(&pool, "loud").await.unwrap();
        let store = PostStore::new(pool);
        let only = store.create(loud, NewPost::new("hi", None, None)).await.unwrap();

        let graph = StaticFollowGraph::new();
        graph.follow(reader, quiet);
        graph.follow(reader, loud);
        let feed = FeedAggregator::new(store, Arc::new(graph));

        assert_eq!(feed.get_feed(reader).await.unwrap(), vec![only]);
        assert!(feed.get_feed(quiet).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn feed_survives_very_large_follow_lists() {
        let pool = db::connect_in_memory().await.unwrap();
        let reader = users::create_user(&pool, "reader").await.unwrap();
        let author = users::create_user(&pool, "author").await.unwrap();
        let store = PostStore::new(pool);
        let only = store.create(author, NewPost::new("hi", None, None)).await.unwrap();

        let graph = StaticFollowGraph::new();
        for followee in 1_000_000..1_040_000 {
            graph.follow(reader, followee);
        }
        graph.follow(reader, author);
        let feed = FeedAggregator::new(store, Arc::new(graph));

        assert_eq!(feed.get_feed(reader).await.unwrap(), vec![only]);
    }
}
