//! User repository trait definition.

use imgshare_types::error::RepositoryError;
use imgshare_types::user::{NewUser, User, UserId};

/// Repository trait for user lookup.
///
/// Implementations live in imgshare-infra (e.g., SqliteUserRepository).
pub trait UserRepository: Send + Sync {
    /// Find a user by their login name.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Find a user by email address.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Find a user by ID.
    fn find_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Register a new user. Fails with `Conflict` on a duplicate username or email.
    fn create(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;
}
