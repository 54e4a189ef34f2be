pub mod models;
pub mod test_utils;

use common::config::Config;
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;

/// Opens a connection to the configured database.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let config = Config::get();

    if !config.database_path.contains("://") && !config.database_path.starts_with("sqlite:") {
        ensure_parent_dir(&config.database_path);
    }

    Database::connect(config.database_url()).await
}

/// SQLite won't create intermediate directories. Failure is logged and left
/// for the connect call to report.
fn ensure_parent_dir(db_path: &str) -> bool {
    let Some(parent) = Path::new(db_path).parent() else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Could not create database directory {}: {err}", parent.display());
            false
        }
    }
}
