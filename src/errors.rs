use crate::dto::Envelope;
use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Unauthorized to delete post")]
    Forbidden,
    #[error(transparent)]
    StoreFailure(#[from] sqlx::Error),
}

impl PostError {
    pub fn status(&self) -> StatusCode {
        match self {
            PostError::NotFound(_) => StatusCode::NOT_FOUND,
            PostError::Forbidden => StatusCode::FORBIDDEN,
            PostError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every failure becomes an envelope without data.
///
/// Domain conditions keep their fixed message; store failures are logged
/// and surface their display string with a 500.
impl<T> From<PostError> for Envelope<T> {
    fn from(err: PostError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            error!("Internal error: {}", err);
        }
        Envelope::new(status, err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_fixed_messages() {
        let env: Envelope<()> = PostError::NotFound("Post not found").into();
        assert_eq!(env.status_code, 404);
        assert_eq!(env.message, "Post not found");
        assert!(env.data.is_none());

        let env: Envelope<()> = PostError::Forbidden.into();
        assert_eq!(env.status_code, 403);
        assert_eq!(env.message, "Unauthorized to delete post");
    }

    #[test]
    fn store_failures_map_to_500_with_error_text() {
        let env: Envelope<()> = PostError::StoreFailure(sqlx::Error::RowNotFound).into();
        assert_eq!(env.status_code, 500);
        assert_eq!(env.message, sqlx::Error::RowNotFound.to_string());
    }
}
