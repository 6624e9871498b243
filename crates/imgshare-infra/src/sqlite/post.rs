//! SQLite post repository implementation.
//!
//! Liked usernames live in `post_liked_users`. Every read fetches them in the
//! same transaction as the post rows, and every save rewrites them in the same
//! transaction as the post row.

use std::collections::{BTreeSet, HashMap};

use imgshare_core::repository::post::PostRepository;
use imgshare_types::error::RepositoryError;
use imgshare_types::post::{NewPost, Post, PostId};
use imgshare_types::user::UserId;
use sqlx::{Row, Sqlite};

use super::pool::DatabasePool;
use super::{format_datetime, now, parse_datetime};

/// SQLite-backed implementation of `PostRepository`.
#[derive(Debug, Clone)]
pub struct SqlitePostRepository {
    pool: DatabasePool,
}

impl SqlitePostRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Fetch one post and its liked users from a single read snapshot.
    ///
    /// Both queries run in one transaction so `likes` and the liked-user rows
    /// come from the same commit.
    async fn find_one(
        &self,
        sql: &str,
        id: &PostId,
        user_id: Option<&UserId>,
    ) -> Result<Option<Post>, RepositoryError> {
        let mut tx = self.pool.reader.begin().await.map_err(query_error)?;

        let mut query = sqlx::query::<Sqlite>(sql).bind(id.0);
        if let Some(user_id) = user_id {
            query = query.bind(user_id.0);
        }
        let Some(row) = query.fetch_optional(&mut *tx).await.map_err(query_error)? else {
            return Ok(None);
        };
        let post_row = PostRow::from_row(&row).map_err(query_error)?;

        let liked: Vec<(String,)> =
            sqlx::query_as("SELECT username FROM post_liked_users WHERE post_id = ?")
                .bind(post_row.id)
                .fetch_all(&mut *tx)
                .await
                .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        let liked_users = liked.into_iter().map(|(username,)| username).collect();
        Ok(Some(post_row.into_post(liked_users)?))
    }

    /// Fetch a list of posts and the liked users of exactly those posts from a
    /// single read snapshot.
    async fn find_many(
        &self,
        posts_sql: &str,
        likes_sql: &str,
        user_id: Option<&UserId>,
    ) -> Result<Vec<Post>, RepositoryError> {
        let mut tx = self.pool.reader.begin().await.map_err(query_error)?;

        let mut posts = sqlx::query::<Sqlite>(posts_sql);
        let mut likes = sqlx::query_as::<Sqlite, (i64, String)>(likes_sql);
        if let Some(user_id) = user_id {
            posts = posts.bind(user_id.0);
            likes = likes.bind(user_id.0);
        }

        let rows = posts.fetch_all(&mut *tx).await.map_err(query_error)?;
        let likes = likes.fetch_all(&mut *tx).await.map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        assemble(&rows, likes)
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Internal row type for mapping SQLite rows to domain Post.
struct PostRow {
    id: i64,
    title: String,
    caption: String,
    location: String,
    likes: i64,
    user_id: i64,
    created_at: String,
}

impl PostRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            caption: row.try_get("caption")?,
            location: row.try_get("location")?,
            likes: row.try_get("likes")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_post(self, liked_users: BTreeSet<String>) -> Result<Post, RepositoryError> {
        Ok(Post {
            id: PostId(self.id),
            title: self.title,
            caption: self.caption,
            location: self.location,
            created_at: parse_datetime(&self.created_at)?,
            likes: self.likes,
            liked_users,
            user_id: UserId(self.user_id),
        })
    }
}

/// Join post rows with liked-user rows grouped by post id, preserving row order.
fn assemble(
    rows: &[sqlx::sqlite::SqliteRow],
    likes: Vec<(i64, String)>,
) -> Result<Vec<Post>, RepositoryError> {
    let mut liked: HashMap<i64, BTreeSet<String>> = HashMap::new();
    for (post_id, username) in likes {
        liked.entry(post_id).or_default().insert(username);
    }

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        let post_row = PostRow::from_row(row).map_err(query_error)?;
        let liked_users = liked.remove(&post_row.id).unwrap_or_default();
        posts.push(post_row.into_post(liked_users)?);
    }
    Ok(posts)
}

impl PostRepository for SqlitePostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        self.find_one("SELECT * FROM posts WHERE id = ?", id, None).await
    }

    async fn find_by_id_and_user(
        &self,
        id: &PostId,
        user_id: &UserId,
    ) -> Result<Option<Post>, RepositoryError> {
        self.find_one(
            "SELECT * FROM posts WHERE id = ? AND user_id = ?",
            id,
            Some(user_id),
        )
        .await
    }

    async fn find_all_by_created_desc(&self) -> Result<Vec<Post>, RepositoryError> {
        self.find_many(
            "SELECT * FROM posts ORDER BY created_at DESC, id DESC",
            "SELECT post_id, username FROM post_liked_users",
            None,
        )
        .await
    }

    async fn find_all_by_user_created_desc(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Post>, RepositoryError> {
        self.find_many(
            "SELECT * FROM posts WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            "SELECT l.post_id, l.username FROM post_liked_users l
             JOIN posts p ON p.id = l.post_id
             WHERE p.user_id = ?",
            Some(user_id),
        )
        .await
    }

    async fn create(&self, post: &NewPost) -> Result<Post, RepositoryError> {
        let created_at = now();

        let result = sqlx::query(
            "INSERT INTO posts (title, caption, location, likes, user_id, created_at)
             VALUES (?, ?, ?, 0, ?, ?)",
        )
        .bind(&post.title)
        .bind(&post.caption)
        .bind(&post.location)
        .bind(post.user_id.0)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(Post {
            id: PostId(result.last_insert_rowid()),
            title: post.title.clone(),
            caption: post.caption.clone(),
            location: post.location.clone(),
            created_at,
            likes: 0,
            liked_users: BTreeSet::new(),
            user_id: post.user_id,
        })
    }

    async fn save(&self, post: &Post) -> Result<Post, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let stored: Option<(String,)> = sqlx::query_as(
            "UPDATE posts SET title = ?, caption = ?, location = ?, likes = ?, user_id = ?
             WHERE id = ?
             RETURNING created_at",
        )
        .bind(&post.title)
        .bind(&post.caption)
        .bind(&post.location)
        .bind(post.likes)
        .bind(post.user_id.0)
        .bind(post.id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_error)?;

        let Some((created_at,)) = stored else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query("DELETE FROM post_liked_users WHERE post_id = ?")
            .bind(post.id.0)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        for username in &post.liked_users {
            sqlx::query("INSERT INTO post_liked_users (post_id, username) VALUES (?, ?)")
                .bind(post.id.0)
                .bind(username)
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;

        // created_at is never rewritten; report the stored value
        Ok(Post {
            created_at: parse_datetime(&created_at)?,
            ..post.clone()
        })
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepositoryError> {
        // post_liked_users rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
