//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::{DatabaseConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Name of the backing store, reported by the health endpoint.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with the store selected by configuration.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> io::Result<Self> {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => {
                let connections = DatabaseConnections::init(config).await.map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    io::Error::other(e.to_string())
                })?;
                Self::with_repository(
                    Arc::new(PostgresPostRepository::new(connections.main)),
                    "postgres",
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without postgres feature");
            }
            Self::in_memory()
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "in-memory")
    }

    pub fn with_repository(posts: Arc<dyn PostRepository>, storage: &'static str) -> Self {
        Self { posts, storage }
    }
}
