use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a post, assigned by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A stored post.
///
/// `likes` always equals `liked_users.len()`; the set guarantees a user can
/// only be counted once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub caption: String,
    pub location: String,
    /// Set by the persistence layer on insert, never changed afterwards.
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    /// Usernames that currently like this post.
    pub liked_users: BTreeSet<String>,
    /// Owning user.
    pub user_id: UserId,
}

/// A post that has not been persisted yet.
///
/// The repository assigns `id` and `created_at`, and starts the post with
/// no likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub caption: String,
    pub location: String,
    pub user_id: UserId,
}

/// Caller-supplied fields for creating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub caption: String,
    pub location: String,
}

/// Caller-supplied fields for editing a post.
///
/// Only title, caption, and location are editable; likes are never taken
/// from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: PostId,
    pub title: String,
    pub caption: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_parse_and_display() {
        let id: PostId = "42".parse().unwrap();
        assert_eq!(id, PostId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<PostId>().is_err());
    }

    #[test]
    fn test_post_serializes_liked_users_as_array() {
        let post = Post {
            id: PostId(1),
            title: "T".to_string(),
            caption: "C".to_string(),
            location: "L".to_string(),
            created_at: Utc::now(),
            likes: 2,
            liked_users: ["bob".to_string(), "alice".to_string()].into_iter().collect(),
            user_id: UserId(7),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["liked_users"], serde_json::json!(["alice", "bob"]));
        assert_eq!(json["user_id"], 7);
    }
}
