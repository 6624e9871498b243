//! Image attachment service.
//!
//! Stores the single image attached to a post. Payload bytes are kept as
//! given; encoding and compression belong to whoever produced them.

use imgshare_types::error::PostError;
use imgshare_types::image::{ImageModel, NewImage};
use imgshare_types::post::PostId;
use imgshare_types::principal::Principal;
use tracing::Span;

use crate::repository::image::ImageRepository;
use crate::repository::post::PostRepository;
use crate::repository::user::UserRepository;
use crate::service::ownership::{owned_post, user_by_principal};

pub struct ImageService<U: UserRepository, P: PostRepository, I: ImageRepository> {
    user_repo: U,
    post_repo: P,
    image_repo: I,
    span: Span,
}

impl<U: UserRepository, P: PostRepository, I: ImageRepository> ImageService<U, P, I> {
    pub fn new(user_repo: U, post_repo: P, image_repo: I, span: Span) -> Self {
        Self {
            user_repo,
            post_repo,
            image_repo,
            span,
        }
    }

    pub fn with_default_span(user_repo: U, post_repo: P, image_repo: I) -> Self {
        Self::new(
            user_repo,
            post_repo,
            image_repo,
            tracing::info_span!("image_service"),
        )
    }

    /// Attach an image to a post owned by the principal's user.
    ///
    /// Replaces any image already attached, so a post never has more than one.
    pub async fn upload_image_to_post(
        &self,
        post_id: &PostId,
        name: &str,
        image_bytes: Vec<u8>,
        principal: &Principal,
    ) -> Result<ImageModel, PostError> {
        let user = user_by_principal(&self.user_repo, principal).await?;
        let post = owned_post(&self.post_repo, post_id, &user).await?;

        if let Some(previous) = self.image_repo.find_by_post_id(&post.id).await? {
            self.image_repo.delete(&previous.id).await?;
        }

        let image = NewImage {
            name: name.to_string(),
            image_bytes,
            user_id: Some(user.id),
            post_id: Some(post.id),
        };

        tracing::info!(
            parent: &self.span,
            post_id = %post.id,
            size = image.image_bytes.len(),
            "uploading image to post"
        );

        Ok(self.image_repo.create(&image).await?)
    }

    /// The image attached to a post. Anyone may view it.
    pub async fn get_image_for_post(&self, post_id: &PostId) -> Result<ImageModel, PostError> {
        self.image_repo
            .find_by_post_id(post_id)
            .await?
            .ok_or(PostError::ImageNotFound(post_id.0))
    }
}
