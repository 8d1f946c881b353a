// pgfleet/src/backup/db_dump.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which;

use crate::config::ServerConfig;

// Helper function to find pg_dump executable
fn find_pg_dump_executable() -> Result<PathBuf> {
    which("pg_dump").context(
        "pg_dump executable not found in PATH. Please ensure PostgreSQL client tools are installed and in your PATH.",
    )
}

/// Dumps one database to `output_path` in pg_dump's custom archive format.
///
/// Runs pg_dump synchronously with stdout/stderr inherited, so the tool's
/// own output lands in this process's streams, and blocks until it exits.
/// The password is passed in the child's environment only; the parent
/// process environment is never touched. A partial output file left behind
/// on failure is the caller's cleanup responsibility.
pub fn dump_database(
    server: &ServerConfig,
    db_name: &str,
    output_path: &Path,
) -> Result<PathBuf> {
    let pg_dump_path = find_pg_dump_executable()?;

    println!(
        "Dumping database {} to {} using pg_dump...",
        db_name,
        output_path.display()
    );

    let status = Command::new(&pg_dump_path)
        .env("PGPASSWORD", &server.password)
        .arg("-h")
        .arg(&server.host)
        .arg("-p")
        .arg(server.port.to_string())
        .arg("-U")
        .arg(&server.user)
        .arg("-F")
        .arg("c")
        .arg("-f")
        .arg(output_path)
        .arg(db_name)
        .status()
        .with_context(|| format!("Failed to execute pg_dump for database: {}", db_name))?;

    if !status.success() {
        anyhow::bail!(
            "pg_dump for database {} failed with status: {}",
            db_name,
            status
        );
    }

    println!("✓ Database {} dumped successfully via pg_dump.", db_name);
    Ok(output_path.to_path_buf())
}
