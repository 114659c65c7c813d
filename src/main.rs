use anyhow::Context;
use post_feed::{
    AppState, create_router,
    config::Config,
    db,
    services::{PostService, SqlFollowService},
    store::PostStore,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let follows = Arc::new(SqlFollowService::new(pool.clone()));
    let state = AppState {
        posts: PostService::new(PostStore::new(pool), follows),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health                          - Health check");
    info!("  GET    /post/feed/{{user_id}}             - Feed of followed users");
    info!("  GET    /post/{{user_id}}/posts            - Posts by user");
    info!("  POST   /post/{{user_id}}/post             - Create post");
    info!("  DELETE /post/{{user_id}}/posts/{{post_id}}  - Delete post (owner only)");
    info!("  GET    /post/location/{{location}}        - Posts at location");
    info!("  GET    /post/hashtag/{{hashtag}}          - Posts with hashtag");

    axum::serve(listener, app).await?;
    Ok(())
}
