// pgfleet/src/restore/logic.rs
use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::naming;
use crate::report::{BatchReport, FailedStep};

use super::{db_restore, s3_download};

/// Restores every artifact stored under `key_prefix`.
///
/// Listing failure aborts the run. Each key after that is isolated: a
/// failed decode, download or restore is recorded in the report and the
/// loop moves on. The target database name comes from the key's basename.
pub async fn perform_restore_run(app_config: &AppConfig, key_prefix: &str) -> Result<BatchReport> {
    println!("🔄 Starting restore run for prefix: {}", key_prefix);

    let keys = s3_download::list_backup_keys(&app_config.storage, key_prefix)
        .await
        .context("Failed to list backup files in S3")?;

    if keys.is_empty() {
        println!("No backup files found under prefix {}.", key_prefix);
        return Ok(BatchReport::new());
    }

    let mut report = BatchReport::new();

    for s3_key in &keys {
        println!("\n📥 Processing backup file: {}", s3_key);

        let filename = naming::filename_from_key(s3_key);

        let db_name = match naming::decode_database_name(filename) {
            Ok(name) => name,
            Err(e) => {
                eprintln!("❌ Skipping {}: {:#}", s3_key, e);
                report.record_failure(s3_key, FailedStep::Decode, format!("{:#}", e));
                continue;
            }
        };

        // Scratch directory scoped to this key; dropped on every path out
        // of the iteration.
        let scratch = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("❌ Failed to create scratch directory for {}: {}", s3_key, e);
                report.record_failure(s3_key, FailedStep::Download, e.to_string());
                continue;
            }
        };
        let local_path = scratch.path().join(filename);

        if let Err(e) =
            s3_download::download_file_from_s3(&app_config.storage, s3_key, &local_path).await
        {
            eprintln!("❌ Failed to download backup file {}: {:#}", s3_key, e);
            report.record_failure(s3_key, FailedStep::Download, format!("{:#}", e));
            continue;
        }

        if let Err(e) = db_restore::restore_database(&app_config.server, &db_name, &local_path) {
            eprintln!("❌ Failed to restore database {}: {:#}", db_name, e);
            report.record_failure(&db_name, FailedStep::Restore, format!("{:#}", e));
            continue;
        }

        report.record_success(&db_name);
    }

    println!("\n🏁 Restore run for prefix {} finished.", key_prefix);
    Ok(report)
}
