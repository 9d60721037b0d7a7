//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use posts_core::PostService;
use posts_core::ports::PostRepository;
use posts_infra::{InMemoryPostRepository, PostMetrics};

#[cfg(feature = "postgres")]
use posts_infra::database::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub metrics: Arc<PostMetrics>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without `DATABASE_URL` the service runs on the in-memory repository.
    /// A configured database that cannot be reached is a startup error.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        let (db, repo): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) =
            match &config.database {
                Some(db_config) => {
                    let connections = DatabaseConnections::init(db_config)
                        .await
                        .context("failed to connect to database")?;
                    let repo = Arc::new(PostgresPostRepository::new(connections.main.clone()));
                    (Some(Arc::new(connections)), repo)
                }
                None => {
                    tracing::warn!(
                        "DATABASE_URL not set. Running without database (in-memory mode)."
                    );
                    (None, Arc::new(InMemoryPostRepository::new()))
                }
            };

        #[cfg(not(feature = "postgres"))]
        let repo: Arc<dyn PostRepository> = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        let state = Self::with_repository(repo).context("failed to register metrics")?;
        tracing::info!("Application state initialized");

        #[cfg(feature = "postgres")]
        let state = Self { db, ..state };

        Ok(state)
    }

    /// State over an explicit repository, with a fresh metrics registry.
    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Result<Self, prometheus::Error> {
        let metrics = Arc::new(PostMetrics::new()?);
        let posts = PostService::new(repo).with_observer(metrics.clone());

        Ok(Self {
            posts,
            metrics,
            #[cfg(feature = "postgres")]
            db: None,
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new())).unwrap()
    }
}
