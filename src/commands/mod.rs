pub mod ingest;
pub mod report;
pub mod search;

use serde::Serialize;

use crate::config::Config;
use crate::db::repository::DocumentRepository;

/// Result of `init`: where the database lives and what it holds.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub database_path: String,
    pub documents: i64,
}

/// Create the database file if needed and apply pending migrations.
pub fn init_database(config: &Config) -> Result<DatabaseStatus, String> {
    let repository = DocumentRepository::new(&config.database_path);
    repository
        .initialize()
        .map_err(|e| format!("Database error: {e}"))?;
    let documents = repository
        .count()
        .map_err(|e| format!("Database error: {e}"))?;

    tracing::info!(
        path = %config.database_path.display(),
        documents,
        "Database initialised"
    );
    Ok(DatabaseStatus {
        database_path: config.database_path.display().to_string(),
        documents,
    })
}

/// Repository for read commands. The schema is brought up to date first so
/// queries against a fresh path return empty results instead of errors.
pub(crate) fn open_repository(config: &Config) -> Result<DocumentRepository, String> {
    let repository = DocumentRepository::new(&config.database_path);
    repository
        .initialize()
        .map_err(|e| format!("Database error: {e}"))?;
    Ok(repository)
}
