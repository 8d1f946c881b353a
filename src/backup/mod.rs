// pgfleet/src/backup/mod.rs
mod logic;
pub(crate) mod db_dump;
pub(crate) mod s3_upload;

use anyhow::Result;

use crate::config::AppConfig;
use crate::report::BatchReport;

/// Public entry point for the backup process.
///
/// Returns the per-database outcome report; only enumeration failure is an
/// `Err`.
pub async fn run_backup_flow(app_config: &AppConfig) -> Result<BatchReport> {
    logic::perform_backup_run(app_config).await
}
