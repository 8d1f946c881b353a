// pgfleet/src/restore/mod.rs
mod logic;
pub(crate) mod db_restore;
pub(crate) mod s3_download;

use anyhow::Result;

use crate::config::AppConfig;
use crate::report::BatchReport;

/// Public entry point for the restore process.
///
/// `key_prefix` must be the run prefix of a previous backup. Returns the
/// per-file outcome report; only listing failure is an `Err`.
pub async fn run_restore_flow(app_config: &AppConfig, key_prefix: &str) -> Result<BatchReport> {
    logic::perform_restore_run(app_config, key_prefix).await
}
