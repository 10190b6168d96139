//! User Service Library
//!
//! This crate provides login, registration and user record management over
//! a pluggable repository. It is embedded by the HTTP gateway and the
//! combined binary.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserStore};
use crate::service::UserManager;

pub use crate::service::UserService;

/// Connect to the database, apply pending migrations and build the service.
pub async fn connect(
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserService>, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;

    let user_repo = Arc::new(UserStore::new(db.into_connection()));
    Ok(Arc::new(UserManager::new(user_repo)))
}

/// Build the service over an empty in-memory store (development mode).
pub fn in_memory() -> Arc<dyn UserService> {
    info!("Using in-memory user store; data is lost on exit");
    Arc::new(UserManager::new(Arc::new(InMemoryUserStore::new())))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
