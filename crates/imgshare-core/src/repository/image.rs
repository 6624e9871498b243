//! Image repository trait definition.

use imgshare_types::error::RepositoryError;
use imgshare_types::image::{ImageId, ImageModel, NewImage};
use imgshare_types::post::PostId;

/// Repository trait for image persistence.
pub trait ImageRepository: Send + Sync {
    /// The image attached to a post, if any.
    fn find_by_post_id(
        &self,
        post_id: &PostId,
    ) -> impl std::future::Future<Output = Result<Option<ImageModel>, RepositoryError>> + Send;

    /// Insert a new image.
    fn create(
        &self,
        image: &NewImage,
    ) -> impl std::future::Future<Output = Result<ImageModel, RepositoryError>> + Send;

    /// Overwrite an existing image record.
    fn save(
        &self,
        image: &ImageModel,
    ) -> impl std::future::Future<Output = Result<ImageModel, RepositoryError>> + Send;

    /// Permanently delete an image by ID.
    fn delete(
        &self,
        id: &ImageId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
