//! `PostService` and `ImageService` wired to the SQLite repositories.

use std::sync::Arc;

use imgshare_core::repository::image::ImageRepository;
use imgshare_core::repository::post::PostRepository;
use imgshare_core::repository::user::UserRepository;
use imgshare_core::service::image::ImageService;
use imgshare_core::service::post::PostService;
use imgshare_types::error::PostError;
use imgshare_types::post::{CreatePostRequest, Post, PostId, UpdatePostRequest};
use imgshare_types::principal::Principal;
use imgshare_types::user::NewUser;

use super::image::SqliteImageRepository;
use super::pool::tests::test_pool;
use super::post::SqlitePostRepository;
use super::user::SqliteUserRepository;

type SqlitePostService =
    PostService<SqliteUserRepository, SqlitePostRepository, SqliteImageRepository>;
type SqliteImageService =
    ImageService<SqliteUserRepository, SqlitePostRepository, SqliteImageRepository>;

struct Fixture {
    posts: SqlitePostService,
    images: SqliteImageService,
    post_repo: SqlitePostRepository,
    image_repo: SqliteImageRepository,
}

async fn fixture() -> Fixture {
    let pool = test_pool().await;
    let users = SqliteUserRepository::new(pool.clone());
    for name in ["alice", "bob"] {
        users
            .create(&NewUser {
                username: name.to_string(),
                email: format!("{name}@example.com"),
            })
            .await
            .unwrap();
    }
    let post_repo = SqlitePostRepository::new(pool.clone());
    let image_repo = SqliteImageRepository::new(pool);

    Fixture {
        posts: PostService::with_default_span(users.clone(), post_repo.clone(), image_repo.clone()),
        images: ImageService::with_default_span(users, post_repo.clone(), image_repo.clone()),
        post_repo,
        image_repo,
    }
}

fn request(title: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        caption: "C".to_string(),
        location: "L".to_string(),
    }
}

fn assert_consistent(post: &Post) {
    assert_eq!(
        post.likes,
        post.liked_users.len() as i64,
        "likes out of step with liked users: {post:?}"
    );
}

#[tokio::test]
async fn test_like_toggle_scenario() {
    let f = fixture().await;
    let alice = Principal::new("alice");
    let post = f.posts.create_post(request("T"), &alice).await.unwrap();

    let liked = f.posts.like_post(&post.id, "bob").await.unwrap();
    assert_eq!(liked.likes, 1);
    assert!(liked.liked_users.contains("bob"));

    let unliked = f.posts.like_post(&post.id, "bob").await.unwrap();
    assert_eq!(unliked.likes, 0);
    assert!(unliked.liked_users.is_empty());

    let stored = f.posts.get_post_by_id(&post.id, &alice).await.unwrap();
    assert_eq!(stored.likes, 0);
    assert!(stored.liked_users.is_empty());

    let err = f
        .posts
        .get_post_by_id(&post.id, &Principal::new("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::PostNotFound(_)));
}

#[tokio::test]
async fn test_delete_post_removes_attached_image() {
    let f = fixture().await;
    let alice = Principal::new("alice");
    let post = f.posts.create_post(request("T"), &alice).await.unwrap();
    f.images
        .upload_image_to_post(&post.id, "a.png", vec![7, 8], &alice)
        .await
        .unwrap();

    f.posts.delete_post(&post.id, &alice).await.unwrap();

    assert!(f.post_repo.find_by_id(&post.id).await.unwrap().is_none());
    assert!(f.image_repo.find_by_post_id(&post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_post_keeps_likes_and_image() {
    let f = fixture().await;
    let alice = Principal::new("alice");
    let post = f.posts.create_post(request("T"), &alice).await.unwrap();
    let image = f
        .images
        .upload_image_to_post(&post.id, "a.png", vec![1, 2, 3], &alice)
        .await
        .unwrap();
    f.posts.like_post(&post.id, "bob").await.unwrap();

    let updated = f
        .posts
        .update_post(
            UpdatePostRequest {
                id: post.id,
                title: "T2".to_string(),
                caption: "C2".to_string(),
                location: "L2".to_string(),
            },
            &alice,
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.likes, 1);
    assert_eq!(updated.created_at, post.created_at);

    let stored_image = f.images.get_image_for_post(&post.id).await.unwrap();
    assert_eq!(stored_image.id, image.id);
    assert_eq!(stored_image.image_bytes, vec![1, 2, 3]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_keep_count_in_step() {
    let f = fixture().await;
    let post = f
        .posts
        .create_post(request("T"), &Principal::new("alice"))
        .await
        .unwrap();
    let service = Arc::new(f.posts);

    for round in 0..5 {
        let mut likers = Vec::new();
        for i in 0..10 {
            let service = Arc::clone(&service);
            let post_id = post.id;
            likers.push(tokio::spawn(async move {
                service.like_post(&post_id, &format!("user-{round}-{i}")).await
            }));
        }

        let mut readers = Vec::new();
        for _ in 0..10 {
            let repo = f.post_repo.clone();
            let post_id = post.id;
            readers.push(tokio::spawn(async move {
                repo.find_by_id(&post_id).await.unwrap().unwrap()
            }));
        }

        for handle in likers {
            assert_consistent(&handle.await.unwrap().unwrap());
        }
        for handle in readers {
            assert_consistent(&handle.await.unwrap());
        }
    }

    // Concurrent toggles may lose updates, but every surviving like can be removed.
    let stored = f.post_repo.find_by_id(&post.id).await.unwrap().unwrap();
    assert_consistent(&stored);
    for username in &stored.liked_users {
        let after = service.like_post(&post.id, username).await.unwrap();
        assert_consistent(&after);
        assert!(!after.liked_users.contains(username));
    }

    let cleared = f.post_repo.find_by_id(&post.id).await.unwrap().unwrap();
    assert_eq!(cleared.likes, 0);
    assert!(cleared.liked_users.is_empty());
}

#[tokio::test]
async fn test_like_missing_post() {
    let f = fixture().await;
    let err = f.posts.like_post(&PostId(404), "bob").await.unwrap_err();
    assert_eq!(err.to_string(), "post cannot be found");
}
