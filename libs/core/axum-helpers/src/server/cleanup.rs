use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Closes the Postgres connection pool, logging the outcome.
pub async fn close_postgres(db: DatabaseConnection) {
    info!("Closing Postgres connection pool");
    match db.close().await {
        Ok(()) => info!("Postgres connection pool closed"),
        Err(e) => error!("Failed to close Postgres connection pool: {}", e),
    }
}

/// Collects cleanup futures to run during shutdown.
///
/// # Example
/// ```ignore
/// let cleanup = CleanupCoordinator::new().with_postgres(db).run();
/// create_production_app(router, &config, timeout, cleanup).await?;
/// ```
#[derive(Default)]
pub struct CleanupCoordinator {
    postgres: Option<DatabaseConnection>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postgres(mut self, db: DatabaseConnection) -> Self {
        self.postgres = Some(db);
        self
    }

    /// Runs all registered cleanup tasks.
    pub async fn run(self) {
        if let Some(db) = self.postgres {
            close_postgres(db).await;
        }
    }
}
