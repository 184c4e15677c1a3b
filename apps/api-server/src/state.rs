//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::BlogService;
use blogicum_core::ports::UserRepository;
use blogicum_infra::{DatabaseConfig, InMemoryDatabase};

#[cfg(feature = "postgres")]
use blogicum_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository, connect,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match connect(config).await {
                    Ok(conn) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            blog: BlogService::new(
                                Arc::new(PostgresUserRepository::new(conn.clone())),
                                Arc::new(PostgresCategoryRepository::new(conn.clone())),
                                Arc::new(PostgresLocationRepository::new(conn.clone())),
                                Arc::new(PostgresPostRepository::new(conn.clone())),
                                Arc::new(PostgresCommentRepository::new(conn)),
                            ),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - DATABASE_URL is ignored");
            }
        }

        Self::in_memory()
    }

    /// State backed by a fresh in-memory store. Data is lost on restart.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryDatabase::new()))
    }

    pub fn with_store(db: Arc<InMemoryDatabase>) -> Self {
        Self {
            blog: BlogService::new(db.clone(), db.clone(), db.clone(), db.clone(), db),
        }
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        self.blog.users()
    }
}
