//! Principal and ownership lookups shared by the services.

use imgshare_types::error::PostError;
use imgshare_types::post::{Post, PostId};
use imgshare_types::principal::Principal;
use imgshare_types::user::User;

use crate::repository::post::PostRepository;
use crate::repository::user::UserRepository;

/// The stored user behind an authenticated principal.
pub(crate) async fn user_by_principal<U: UserRepository>(
    users: &U,
    principal: &Principal,
) -> Result<User, PostError> {
    let username = principal.name();
    users
        .find_by_username(username)
        .await?
        .ok_or_else(|| PostError::UserNotFound(username.to_string()))
}

/// A post owned by `owner`.
///
/// A post owned by someone else is reported exactly like a missing one.
pub(crate) async fn owned_post<P: PostRepository>(
    posts: &P,
    post_id: &PostId,
    owner: &User,
) -> Result<Post, PostError> {
    posts
        .find_by_id_and_user(post_id, &owner.id)
        .await?
        .ok_or_else(|| {
            PostError::PostNotFound(format!(
                "post cannot be found for username: {}",
                owner.email
            ))
        })
}
