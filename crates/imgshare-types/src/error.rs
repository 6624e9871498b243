use thiserror::Error;

/// Errors surfaced by the post and image services.
#[derive(Debug, Error)]
pub enum PostError {
    /// The principal does not match any stored user.
    #[error("username not found with username {0}")]
    UserNotFound(String),

    /// The post does not exist, or is not owned by the caller.
    #[error("{0}")]
    PostNotFound(String),

    #[error("image not found for post {0}")]
    ImageNotFound(i64),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<RepositoryError> for PostError {
    fn from(e: RepositoryError) -> Self {
        PostError::StorageError(e.to_string())
    }
}

/// Errors from repository operations (used by trait definitions in imgshare-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_error_display() {
        let err = PostError::UserNotFound("alice".to_string());
        assert_eq!(err.to_string(), "username not found with username alice");

        let err = PostError::PostNotFound("post cannot be found".to_string());
        assert_eq!(err.to_string(), "post cannot be found");
    }

    #[test]
    fn test_repository_error_converts_to_storage_error() {
        let err: PostError = RepositoryError::Query("syntax error".to_string()).into();
        assert!(matches!(err, PostError::StorageError(ref msg) if msg == "query error: syntax error"));
    }
}
