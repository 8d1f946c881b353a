//! Fleet-wide PostgreSQL Backup/Restore Tool
//!
//! Dumps every non-template database on a server to S3 under an epoch-second
//! run prefix, or restores all artifacts of a previous run from that prefix.

// pgfleet/src/main.rs
mod backup;
mod catalog;
mod config;
mod naming;
mod report;
mod restore;

use anyhow::{Context, Result};
use config::AppConfig;
use std::env;
use std::process::ExitCode;

/// Main entry point for the backup/restore tool
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    match run_app().await {
        Ok(_) => {
            println!("✅ Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    let app_config =
        AppConfig::from_env().context("Failed to load configuration from environment")?;

    let args: Vec<String> = env::args().collect();
    let choice = if args.len() > 1 {
        args[1].trim().to_string()
    } else {
        prompt_choice()?
    };

    match choice.as_str() {
        "1" | "backup" => {
            println!("🚀 Starting Backup Process...");
            let report = backup::run_backup_flow(&app_config)
                .await
                .context("Backup process failed")?;
            println!("\n{}", report.summary("database"));
        }
        "2" | "restore" => {
            println!("🔄 Starting Restore Process...");
            let prefix = app_config.restore_prefix.clone().context(
                "PGFLEET_RESTORE_PREFIX must be set to the run prefix of a previous backup \
                 (the epoch-seconds key namespace printed when the backup ran)",
            )?;
            let report = restore::run_restore_flow(&app_config, &prefix)
                .await
                .context("Restore process failed")?;
            println!("\n{}", report.summary("backup file"));
        }
        _ => {
            println!("❌ Invalid choice. Please enter '1' (backup) or '2' (restore).");
            anyhow::bail!("Invalid operation choice");
        }
    }
    Ok(())
}

/// Prompts user to select backup or restore operation
///
/// Returns the user's choice as String
fn prompt_choice() -> Result<String> {
    use std::io::{Write, stdin, stdout};

    println!("Select an operation:");
    println!("1. Take Backup (or type 'backup')");
    println!("2. Restore Backup (or type 'restore')");
    print!("Enter your choice: ");
    stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}
