use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub location: Option<String>,
    pub hashtags: Option<String>,
    pub date_time: DateTime<Utc>,
}

/// Fields supplied by the author when creating a post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub text: String,
    pub location: Option<String>,
    pub hashtags: Option<String>,
}

impl NewPost {
    /// Blank location or hashtags are stored as absent.
    pub fn new(text: impl Into<String>, location: Option<String>, hashtags: Option<String>) -> Self {
        Self {
            text: text.into(),
            location: non_blank(location),
            hashtags: non_blank(hashtags),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
