mod feed;
mod follow;
mod posts;

pub use feed::{FeedAggregator, sort_newest_first};
pub use follow::{FollowService, SqlFollowService, StaticFollowGraph};
pub use posts::PostService;
