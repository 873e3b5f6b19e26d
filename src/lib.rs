pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::services::storage::ImageStore;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        Self { db, config }
    }

    /// Profile image store rooted at the configured upload directory.
    pub fn image_store(&self) -> ImageStore {
        ImageStore::new(&self.config.upload_dir, self.config.max_upload_bytes)
    }
}
