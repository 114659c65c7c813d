mod posts;
pub mod users;

pub use posts::PostStore;
pub(crate) use posts::fold_case;
