//! Directory ingestion command.

use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::processor::{IngestionDriver, SweepReport};

#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    /// Directory to sweep; the configured input directory when absent.
    pub directory: Option<PathBuf>,
    pub dry_run: bool,
    /// Force dedup on even when the configuration leaves it off.
    pub skip_duplicates: bool,
}

/// Sweep a directory into the archive. Per-file failures are reported in the
/// returned `SweepReport`; only database setup or an unreadable directory
/// fail the command.
pub fn ingest_directory(config: &Config, request: &IngestRequest) -> Result<SweepReport, String> {
    let directory = request
        .directory
        .clone()
        .unwrap_or_else(|| config.input_dir.clone());

    if !request.dry_run {
        super::open_repository(config)?;
    }

    let mut config = config.clone();
    config.skip_duplicates |= request.skip_duplicates;

    let driver = IngestionDriver::with_defaults(&config);
    let mut driver_options = driver.options().clone();
    driver_options.dry_run = request.dry_run;
    // Dry runs never open the database.
    if request.dry_run {
        driver_options.skip_duplicates = false;
    }
    let driver = driver.with_options(driver_options);

    driver
        .run(&directory)
        .map_err(|e| format!("Ingestion failed: {e}"))
}
