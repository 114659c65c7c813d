use crate::{
    dto::Envelope,
    errors::PostError,
    models::{NewPost, Post},
    services::{FeedAggregator, FollowService},
    store::PostStore,
};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::info;

/// Post operations shaped into response envelopes.
#[derive(Clone)]
pub struct PostService {
    store: PostStore,
    feed: FeedAggregator,
}

impl PostService {
    pub fn new(store: PostStore, follows: Arc<dyn FollowService>) -> Self {
        let feed = FeedAggregator::new(store.clone(), follows);
        Self { store, feed }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub async fn get_posts(&self, user_id: i64) -> Envelope<Vec<Post>> {
        respond(self.store.list_by_user(user_id).await, StatusCode::OK, "Posts found")
    }

    pub async fn delete_post(&self, user_id: i64, post_id: i64) -> Envelope<()> {
        match self.store.delete(user_id, post_id).await {
            Ok(()) => {
                info!("Post deleted: {} by user {}", post_id, user_id);
                Envelope::new(StatusCode::OK, "Post deleted", None)
            }
            Err(err) => err.into(),
        }
    }

    pub async fn get_posts_by_location(&self, location: &str) -> Envelope<Vec<Post>> {
        respond(
            self.store.list_by_location(location).await,
            StatusCode::OK,
            "Posts found",
        )
    }

    pub async fn get_posts_by_hashtag(&self, hashtag: &str) -> Envelope<Vec<Post>> {
        respond(
            self.store.list_by_hashtag(hashtag).await,
            StatusCode::OK,
            "Posts found",
        )
    }

    pub async fn create_post(&self, user_id: i64, post: NewPost) -> Envelope<Post> {
        let result = self.store.create(user_id, post).await;
        if let Ok(post) = &result {
            info!("Post created: {} by user {}", post.id, user_id);
        }
        respond(result, StatusCode::CREATED, "Post created")
    }

    pub async fn get_feed(&self, user_id: i64) -> Envelope<Vec<Post>> {
        respond(
            self.feed.get_feed(user_id).await,
            StatusCode::OK,
            "Feed retrieved successfully",
        )
    }
}

fn respond<T>(
    result: Result<T, PostError>,
    status: StatusCode,
    message: &'static str,
) -> Envelope<T> {
    match result {
        Ok(data) => Envelope::new(status, message, Some(data)),
        Err(err) => err.into(),
    }
}
