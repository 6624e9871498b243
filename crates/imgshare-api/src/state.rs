//! Application state wiring all services together.
//!
//! Services are generic over repository traits, but AppState pins them to the
//! concrete SQLite implementations.

use std::path::Path;
use std::sync::Arc;

use imgshare_core::service::image::ImageService;
use imgshare_core::service::post::PostService;
use imgshare_infra::config::resolve_database_url;
use imgshare_infra::sqlite::image::SqliteImageRepository;
use imgshare_infra::sqlite::pool::DatabasePool;
use imgshare_infra::sqlite::post::SqlitePostRepository;
use imgshare_infra::sqlite::user::SqliteUserRepository;
use imgshare_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcretePostService =
    PostService<SqliteUserRepository, SqlitePostRepository, SqliteImageRepository>;

pub type ConcreteImageService =
    ImageService<SqliteUserRepository, SqlitePostRepository, SqliteImageRepository>;

/// Shared application state used by every CLI command.
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<ConcretePostService>,
    pub image_service: Arc<ConcreteImageService>,
    /// Direct access for account seeding; the services only read users.
    pub user_repo: SqliteUserRepository,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(data_dir: &Path, config: &GlobalConfig) -> anyhow::Result<Self> {
        let db_url = resolve_database_url(config, data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;
        tracing::debug!(%db_url, "database opened, wiring services");

        let user_repo = SqliteUserRepository::new(db_pool.clone());
        let post_repo = SqlitePostRepository::new(db_pool.clone());
        let image_repo = SqliteImageRepository::new(db_pool);

        let post_service = PostService::with_default_span(
            user_repo.clone(),
            post_repo.clone(),
            image_repo.clone(),
        );
        let image_service = ImageService::with_default_span(user_repo.clone(), post_repo, image_repo);

        Ok(Self {
            post_service: Arc::new(post_service),
            image_service: Arc::new(image_service),
            user_repo,
        })
    }
}
