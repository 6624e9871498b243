//! Post repository trait definition.

use imgshare_types::error::RepositoryError;
use imgshare_types::post::{NewPost, Post, PostId};
use imgshare_types::user::UserId;

/// Repository trait for post persistence.
///
/// List queries return posts newest first (`created_at` descending, ties
/// broken by descending id).
pub trait PostRepository: Send + Sync {
    /// Get a post by its ID regardless of owner.
    fn find_by_id(
        &self,
        id: &PostId,
    ) -> impl std::future::Future<Output = Result<Option<Post>, RepositoryError>> + Send;

    /// Get a post by ID only if it is owned by `user_id`.
    fn find_by_id_and_user(
        &self,
        id: &PostId,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<Post>, RepositoryError>> + Send;

    /// All posts, newest first.
    fn find_all_by_created_desc(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, RepositoryError>> + Send;

    /// All posts owned by `user_id`, newest first.
    fn find_all_by_user_created_desc(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, RepositoryError>> + Send;

    /// Insert a new post. Assigns id and creation time, starts with zero likes.
    fn create(
        &self,
        post: &NewPost,
    ) -> impl std::future::Future<Output = Result<Post, RepositoryError>> + Send;

    /// Persist every mutable field of an existing post, including its liked users.
    fn save(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<Post, RepositoryError>> + Send;

    /// Permanently delete a post by ID.
    fn delete(
        &self,
        id: &PostId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
