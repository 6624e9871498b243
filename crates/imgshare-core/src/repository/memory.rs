//! In-memory repository implementations.
//!
//! Backed by `DashMap` with ids handed out from an atomic counter. Each
//! repository is cheap to clone and clones share state, so a test can keep a
//! handle to the store it passed into a service and inspect it afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use imgshare_types::error::RepositoryError;
use imgshare_types::image::{ImageId, ImageModel, NewImage};
use imgshare_types::post::{NewPost, Post, PostId};
use imgshare_types::user::{NewUser, User, UserId};

use super::image::ImageRepository;
use super::post::PostRepository;
use super::user::UserRepository;

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

/// Newest first, ties broken by descending id.
fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<DashMap<UserId, User>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        if self
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepositoryError::Conflict(format!(
                "user '{}' already exists",
                user.username
            )));
        }

        let created = User {
            id: UserId(next(&self.next_id)),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: Utc::now(),
        };
        self.users.insert(created.id, created.clone());
        Ok(created)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<DashMap<PostId, Post>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        Ok(self.posts.get(id).map(|p| p.value().clone()))
    }

    async fn find_by_id_and_user(
        &self,
        id: &PostId,
        user_id: &UserId,
    ) -> Result<Option<Post>, RepositoryError> {
        Ok(self
            .posts
            .get(id)
            .filter(|p| p.user_id == *user_id)
            .map(|p| p.value().clone()))
    }

    async fn find_all_by_created_desc(&self) -> Result<Vec<Post>, RepositoryError> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.value().clone()).collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn find_all_by_user_created_desc(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Post>, RepositoryError> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.user_id == *user_id)
            .map(|p| p.value().clone())
            .collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn create(&self, post: &NewPost) -> Result<Post, RepositoryError> {
        let created = Post {
            id: PostId(next(&self.next_id)),
            title: post.title.clone(),
            caption: post.caption.clone(),
            location: post.location.clone(),
            created_at: Utc::now(),
            likes: 0,
            liked_users: Default::default(),
            user_id: post.user_id,
        };
        self.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, post: &Post) -> Result<Post, RepositoryError> {
        let mut entry = self.posts.get_mut(&post.id).ok_or(RepositoryError::NotFound)?;
        // Creation time is owned by the store.
        let saved = Post {
            created_at: entry.created_at,
            ..post.clone()
        };
        *entry = saved.clone();
        Ok(saved)
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepositoryError> {
        self.posts
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryImageRepository {
    images: Arc<DashMap<ImageId, ImageModel>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageRepository for InMemoryImageRepository {
    async fn find_by_post_id(
        &self,
        post_id: &PostId,
    ) -> Result<Option<ImageModel>, RepositoryError> {
        Ok(self
            .images
            .iter()
            .filter(|i| i.post_id == Some(*post_id))
            .min_by_key(|i| i.id)
            .map(|i| i.value().clone()))
    }

    async fn create(&self, image: &NewImage) -> Result<ImageModel, RepositoryError> {
        let created = ImageModel {
            id: ImageId(next(&self.next_id)),
            name: image.name.clone(),
            image_bytes: image.image_bytes.clone(),
            user_id: image.user_id,
            post_id: image.post_id,
        };
        self.images.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, image: &ImageModel) -> Result<ImageModel, RepositoryError> {
        let mut entry = self.images.get_mut(&image.id).ok_or(RepositoryError::NotFound)?;
        *entry = image.clone();
        Ok(image.clone())
    }

    async fn delete(&self, id: &ImageId) -> Result<(), RepositoryError> {
        self.images
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, user_id: UserId) -> NewPost {
        NewPost {
            title: title.to_string(),
            caption: String::new(),
            location: String::new(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_user_create_assigns_ids_and_rejects_duplicates() {
        let repo = InMemoryUserRepository::new();
        let alice = repo
            .create(&NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(alice.id, UserId(1));

        let err = repo
            .create(&NewUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let by_email = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email, Some(alice.clone()));
        let by_id = repo.find_by_id(&alice.id).await.unwrap();
        assert_eq!(by_id, Some(alice));
    }

    #[tokio::test]
    async fn test_find_by_id_and_user_filters_owner() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(&new_post("mine", UserId(1))).await.unwrap();

        assert!(repo.find_by_id_and_user(&post.id, &UserId(1)).await.unwrap().is_some());
        assert!(repo.find_by_id_and_user(&post.id, &UserId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_keeps_creation_time() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(&new_post("original", UserId(1))).await.unwrap();

        let mut edited = post.clone();
        edited.title = "edited".to_string();
        edited.created_at = post.created_at + chrono::Duration::days(1);
        let saved = repo.save(&edited).await.unwrap();

        assert_eq!(saved.title, "edited");
        assert_eq!(saved.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_save_and_delete_missing_post() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(&new_post("gone", UserId(1))).await.unwrap();
        repo.delete(&post.id).await.unwrap();

        assert!(matches!(repo.save(&post).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.delete(&post.id).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_image_by_post_id() {
        let repo = InMemoryImageRepository::new();
        let image = repo
            .create(&NewImage {
                name: "cat.png".to_string(),
                image_bytes: vec![1, 2, 3],
                user_id: Some(UserId(1)),
                post_id: Some(PostId(9)),
            })
            .await
            .unwrap();

        assert_eq!(repo.find_by_post_id(&PostId(9)).await.unwrap(), Some(image));
        assert!(repo.find_by_post_id(&PostId(10)).await.unwrap().is_none());
    }
}
