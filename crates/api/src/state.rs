//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::TokenCodec;
use crate::storage::{ImageStore, StorageError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; the composition root builds it once at
/// startup and hands it to the router.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    images: ImageStore,
    tokens: TokenCodec,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The configuration is consumed at construction; handlers only ever see
    /// the pool, the image store, and the token codec built from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the uploads directory cannot be created.
    pub fn new(config: &ApiConfig, pool: PgPool) -> Result<Self, StorageError> {
        let images = ImageStore::new(&config.uploads_dir)?;
        let tokens = TokenCodec::new(&config.token_secret);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                pool,
                images,
                tokens,
            }),
        })
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the image file store.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }

    /// Get a reference to the bearer-token codec.
    #[must_use]
    pub fn tokens(&self) -> &TokenCodec {
        &self.inner.tokens
    }
}
