//! Post orchestration service.
//!
//! Mediates between a caller surface and the user, post, and image
//! repositories: post creation, ownership-checked lookup, the like/unlike
//! toggle, update, and delete with its attached image.

use imgshare_types::error::PostError;
use imgshare_types::post::{CreatePostRequest, NewPost, Post, PostId, UpdatePostRequest};
use imgshare_types::principal::Principal;
use tracing::Span;

use crate::repository::image::ImageRepository;
use crate::repository::post::PostRepository;
use crate::repository::user::UserRepository;
use crate::service::ownership::{owned_post, user_by_principal};

/// Service orchestrating the post lifecycle.
///
/// Generic over the repository traits -- imgshare-core never depends on
/// imgshare-infra. Log events are emitted as children of `span`, which the
/// caller injects and which lives as long as the service.
pub struct PostService<U: UserRepository, P: PostRepository, I: ImageRepository> {
    user_repo: U,
    post_repo: P,
    image_repo: I,
    span: Span,
}

impl<U: UserRepository, P: PostRepository, I: ImageRepository> PostService<U, P, I> {
    /// Create a new PostService.
    ///
    /// - `user_repo`: resolves principals to users
    /// - `post_repo`: persistence for posts
    /// - `image_repo`: persistence for the image attached to a post
    /// - `span`: parent span for every event this service logs
    pub fn new(user_repo: U, post_repo: P, image_repo: I, span: Span) -> Self {
        Self {
            user_repo,
            post_repo,
            image_repo,
            span,
        }
    }

    /// Create a service logging under a fresh `post_service` span.
    pub fn with_default_span(user_repo: U, post_repo: P, image_repo: I) -> Self {
        Self::new(
            user_repo,
            post_repo,
            image_repo,
            tracing::info_span!("post_service"),
        )
    }

    /// Create a post owned by the principal's user. The post starts with no likes.
    pub async fn create_post(
        &self,
        request: CreatePostRequest,
        principal: &Principal,
    ) -> Result<Post, PostError> {
        let user = user_by_principal(&self.user_repo, principal).await?;

        let post = NewPost {
            title: request.title,
            caption: request.caption,
            location: request.location,
            user_id: user.id,
        };

        tracing::info!(parent: &self.span, email = %user.email, "saving post for user");

        Ok(self.post_repo.create(&post).await?)
    }

    /// All posts, newest first.
    pub async fn get_all_posts(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.post_repo.find_all_by_created_desc().await?)
    }

    /// Get a post owned by the principal's user.
    ///
    /// A post owned by someone else is reported exactly like a missing one.
    pub async fn get_post_by_id(
        &self,
        post_id: &PostId,
        principal: &Principal,
    ) -> Result<Post, PostError> {
        let user = user_by_principal(&self.user_repo, principal).await?;
        owned_post(&self.post_repo, post_id, &user).await
    }

    /// The principal's own posts, newest first.
    pub async fn get_all_posts_for_user(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Post>, PostError> {
        let user = user_by_principal(&self.user_repo, principal).await?;
        Ok(self.post_repo.find_all_by_user_created_desc(&user.id).await?)
    }

    /// Toggle `username`'s like on a post.
    ///
    /// Any user may like any post, so the lookup is by id alone. The post is
    /// read, flipped, and saved without a lock or version check: two
    /// concurrent toggles on the same post can lose an update.
    pub async fn like_post(&self, post_id: &PostId, username: &str) -> Result<Post, PostError> {
        let mut post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| PostError::PostNotFound("post cannot be found".to_string()))?;

        let liked = if post.liked_users.remove(username) {
            post.likes -= 1;
            false
        } else {
            post.liked_users.insert(username.to_string());
            post.likes += 1;
            true
        };

        tracing::debug!(
            parent: &self.span,
            post_id = %post.id,
            username,
            liked,
            likes = post.likes,
            "toggled like"
        );

        Ok(self.post_repo.save(&post).await?)
    }

    /// Delete a post owned by the principal's user, then its image if it has one.
    ///
    /// The two deletes are separate operations. If the image delete fails,
    /// the post is already gone and the image record is left orphaned.
    pub async fn delete_post(&self, post_id: &PostId, principal: &Principal) -> Result<(), PostError> {
        let post = self.get_post_by_id(post_id, principal).await?;
        let image = self.image_repo.find_by_post_id(&post.id).await?;

        self.post_repo.delete(&post.id).await?;

        if let Some(image) = image {
            if let Err(e) = self.image_repo.delete(&image.id).await {
                tracing::warn!(
                    parent: &self.span,
                    post_id = %post.id,
                    image_id = %image.id,
                    error = %e,
                    "post deleted but its image was not; image record is orphaned"
                );
                return Err(e.into());
            }
        }

        tracing::info!(parent: &self.span, post_id = %post.id, "deleted post");
        Ok(())
    }

    /// Overwrite title, caption, and location of a post owned by the principal's user.
    ///
    /// Likes are left untouched. An attached image is saved again, unchanged,
    /// after the post.
    pub async fn update_post(
        &self,
        request: UpdatePostRequest,
        principal: &Principal,
    ) -> Result<Post, PostError> {
        let mut post = self.get_post_by_id(&request.id, principal).await?;
        post.title = request.title;
        post.caption = request.caption;
        post.location = request.location;

        let image = self.image_repo.find_by_post_id(&request.id).await?;
        let saved = self.post_repo.save(&post).await?;
        if let Some(image) = image {
            self.image_repo.save(&image).await?;
        }

        Ok(saved)
    }
}
