//! Social post storage and feed aggregation over SQLite.
//!
//! - Post listing by author, location and hashtag
//! - Post creation and owner-gated deletion
//! - Feed built from followed users' posts
//! - Uniform `{status_code, message, data}` envelopes for every outcome

pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/post/feed/{user_id}", get(routes::post::get_feed))
        .route(
            "/post/location/{location}",
            get(routes::post::get_posts_by_location),
        )
        .route(
            "/post/hashtag/{hashtag}",
            get(routes::post::get_posts_by_hashtag),
        )
        .route("/post/{user_id}/posts", get(routes::post::get_posts))
        .route("/post/{user_id}/post", post(routes::post::create_post))
        .route(
            "/post/{user_id}/posts/{post_id}",
            delete(routes::post::delete_post),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
