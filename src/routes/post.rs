use crate::{
    AppState,
    dto::{CreatePostRequest, Envelope},
    models::Post,
};
use axum::{
    Json,
    extract::{Path, State},
};

/// GET /post/{user_id}/posts
pub async fn get_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Envelope<Vec<Post>> {
    state.posts.get_posts(user_id).await
}

/// POST /post/{user_id}/post
/// Body: { "text": "...", "location": "...", "hashtags": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreatePostRequest>,
) -> Envelope<Post> {
    state.posts.create_post(user_id, payload.into()).await
}

/// DELETE /post/{user_id}/posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path((user_id, post_id)): Path<(i64, i64)>,
) -> Envelope<()> {
    state.posts.delete_post(user_id, post_id).await
}

/// GET /post/location/{location}
pub async fn get_posts_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Envelope<Vec<Post>> {
    state.posts.get_posts_by_location(&location).await
}

/// GET /post/hashtag/{hashtag}
pub async fn get_posts_by_hashtag(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
) -> Envelope<Vec<Post>> {
    state.posts.get_posts_by_hashtag(&hashtag).await
}

/// GET /post/feed/{user_id}
pub async fn get_feed(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Envelope<Vec<Post>> {
    state.posts.get_feed(user_id).await
}
