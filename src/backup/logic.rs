// pgfleet/src/backup/logic.rs
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use tempfile::TempDir;

use crate::catalog;
use crate::config::AppConfig;
use crate::naming;
use crate::report::{BatchReport, FailedStep};

use super::{db_dump, s3_upload};

/// Runs a full backup pass over every non-template database on the server.
///
/// Enumeration failure aborts the run. Everything after that is isolated
/// per database: a failed dump or upload is recorded in the report and the
/// loop moves on to the next database. The run prefix is the epoch-second
/// count at start and becomes the key namespace for every artifact of this
/// run.
pub async fn perform_backup_run(app_config: &AppConfig) -> Result<BatchReport> {
    let run_prefix = Utc::now().timestamp().to_string();
    println!("🚀 Starting backup run with prefix: {}", run_prefix);

    let databases = catalog::list_databases(&app_config.server)
        .await
        .context("Failed to enumerate databases on the source server")?;

    if databases.is_empty() {
        println!("No databases found to back up.");
        return Ok(BatchReport::new());
    }

    let mut report = BatchReport::new();

    for db_name in &databases {
        println!("\n📦 Backing up database: {}", db_name);

        // One scratch directory per database. It drops at the end of this
        // iteration on every path, so local temp usage stays bounded to a
        // single artifact.
        let scratch = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!(
                    "❌ Failed to create scratch directory for {}: {}",
                    db_name, e
                );
                report.record_failure(db_name, FailedStep::Dump, e.to_string());
                continue;
            }
        };

        let captured_at = Local::now().naive_local();
        let dump_path = scratch
            .path()
            .join(naming::backup_filename(db_name, captured_at));

        if let Err(e) = db_dump::dump_database(&app_config.server, db_name, &dump_path) {
            eprintln!("❌ Failed to backup database {}: {:#}", db_name, e);
            report.record_failure(db_name, FailedStep::Dump, format!("{:#}", e));
            continue;
        }

        if let Err(e) =
            s3_upload::upload_file_to_s3(&app_config.storage, &dump_path, &run_prefix).await
        {
            eprintln!("❌ Failed to upload backup for database {}: {:#}", db_name, e);
            report.record_failure(db_name, FailedStep::Upload, format!("{:#}", e));
            continue;
        }

        report.record_success(db_name);
    }

    println!("\n🏁 Backup run {} finished.", run_prefix);
    Ok(report)
}
