mod post;

pub use post::{NewPost, Post};

use serde::{Deserialize, Serialize};

/// A user as reported by the follow service. Only the id is relied upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FollowedUser {
    pub id: i64,
}
