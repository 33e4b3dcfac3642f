use anyhow::Result;
use sea_orm::DatabaseConnection;
use tracing::{debug, error, info, trace};

use crate::bootstrap::{AdminSeed, BootstrapOutcome, prepare_database};
use crate::config::AppConfig;

pub async fn init_database(config: &AppConfig) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    trace!("Attempting to connect to database");
    let db: DatabaseConnection = match config.connect().await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let seed = AdminSeed::new(&config.admin_username, &config.admin_email);
    match prepare_database(&db, &seed).await? {
        BootstrapOutcome::Created { user, .. } => {
            debug!("Reserved user created with id {}", user.id);
        }
        BootstrapOutcome::AlreadyPresent { user } => {
            info!("Reserved user \"{}\" already present", user.username);
        }
    }

    info!("Database initialization completed successfully!");
    trace!("init_database function completed");

    Ok(())
}
