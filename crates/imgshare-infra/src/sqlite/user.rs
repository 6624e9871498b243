//! SQLite user repository implementation.

use imgshare_core::repository::user::UserRepository;
use imgshare_types::error::RepositoryError;
use imgshare_types::user::{NewUser, User, UserId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, now, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, sql: &str, value: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let read = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    let created_at: String = row.try_get("created_at").map_err(read)?;

    Ok(User {
        id: UserId(row.try_get("id").map_err(read)?),
        username: row.try_get("username").map_err(read)?,
        email: row.try_get("email").map_err(read)?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one("SELECT * FROM users WHERE username = ?", username)
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one("SELECT * FROM users WHERE email = ?", email)
            .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let created_at = now();

        let result = sqlx::query("INSERT INTO users (username, email, created_at) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(format_datetime(&created_at))
            .execute(&self.pool.writer)
            .await;

        match result {
            Ok(done) => Ok(User {
                id: UserId(done.last_insert_rowid()),
                username: user.username.clone(),
                email: user.email.clone(),
                created_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "user '{}' or email '{}' already exists",
                    user.username, user.email
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }
}
