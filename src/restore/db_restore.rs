// pgfleet/src/restore/db_restore.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which;

use crate::config::ServerConfig;

/// Finds the pg_restore executable in the system PATH.
fn find_pg_restore_executable() -> Result<PathBuf> {
    which("pg_restore").context(
        "pg_restore executable not found in PATH. Please ensure PostgreSQL client tools are installed and in your PATH.",
    )
}

/// Restores one database from a custom-format archive using pg_restore.
///
/// The `-c` clean flag drops conflicting objects before recreating them, so
/// restoring the same artifact twice leaves the database in the same final
/// state. Runs synchronously with stdout/stderr inherited; the password is
/// passed in the child's environment only.
pub fn restore_database(server: &ServerConfig, db_name: &str, input_path: &Path) -> Result<()> {
    let pg_restore_path = find_pg_restore_executable()?;

    println!(
        "Restoring database {} from {} using pg_restore...",
        db_name,
        input_path.display()
    );

    let status = Command::new(&pg_restore_path)
        .env("PGPASSWORD", &server.password)
        .arg("-h")
        .arg(&server.host)
        .arg("-p")
        .arg(server.port.to_string())
        .arg("-U")
        .arg(&server.user)
        .arg("-d")
        .arg(db_name)
        .arg("-c")
        .arg("-F")
        .arg("c")
        .arg(input_path)
        .status()
        .with_context(|| format!("Failed to execute pg_restore for database: {}", db_name))?;

    if !status.success() {
        anyhow::bail!(
            "pg_restore for database {} failed with status: {}",
            db_name,
            status
        );
    }

    println!(
        "✓ Database {} restored successfully from {}",
        db_name,
        input_path.display()
    );
    Ok(())
}
