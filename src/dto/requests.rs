use crate::models::NewPost;
use serde::Deserialize;

/// Body of `POST /post/{user_id}/post`.
/// Body: { "text": "...", "location": "...", "hashtags": "..." }
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hashtags: Option<String>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost::new(req.text, req.location, req.hashtags)
    }
}
