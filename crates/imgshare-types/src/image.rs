use serde::{Deserialize, Serialize};

use std::fmt;

use crate::post::PostId;
use crate::user::UserId;

/// Unique identifier for a stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub i64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded image. The payload is opaque to the services.
///
/// At most one image is attached to a given post at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageModel {
    pub id: ImageId,
    /// Original file name.
    pub name: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub image_bytes: Vec<u8>,
    /// Uploading user, when the image is a profile picture or owned upload.
    pub user_id: Option<UserId>,
    /// Post the image is attached to.
    pub post_id: Option<PostId>,
}

/// An image that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub name: String,
    pub image_bytes: Vec<u8>,
    pub user_id: Option<UserId>,
    pub post_id: Option<PostId>,
}
