use crate::services::PostService;

/// Shared across all requests; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}
