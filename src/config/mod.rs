// pgfleet/src/config/mod.rs
use anyhow::{Context, Result};
use std::env;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: &str = "5432";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_S3_BUCKET: &str = "kmf-db";
const DEFAULT_S3_REGION: &str = "ap-south-1";

/// Connection parameters for the PostgreSQL server whose databases are
/// backed up or restored.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

/// Target bucket and region in S3.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Run prefix of the backup to restore from. Only required for the
    /// restore operation; checked there, not here.
    pub restore_prefix: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to the
    /// standard deployment defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let port = parse_port(&env_or("PGFLEET_DB_PORT", DEFAULT_DB_PORT))?;

        Ok(AppConfig {
            server: ServerConfig {
                host: env_or("PGFLEET_DB_HOST", DEFAULT_DB_HOST),
                port,
                user: env_or("PGFLEET_DB_USER", DEFAULT_DB_USER),
                password: env_or("PGFLEET_DB_PASSWORD", DEFAULT_DB_PASSWORD),
            },
            storage: StorageConfig {
                bucket: env_or("PGFLEET_S3_BUCKET", DEFAULT_S3_BUCKET),
                region: env_or("PGFLEET_S3_REGION", DEFAULT_S3_REGION),
            },
            restore_prefix: env::var("PGFLEET_RESTORE_PREFIX")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Reads an environment variable, treating unset and blank as the default.
fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .with_context(|| format!("PGFLEET_DB_PORT is not a valid port number: '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_valid() -> anyhow::Result<()> {
        assert_eq!(parse_port("5432")?, 5432);
        assert_eq!(parse_port(" 6543 ")?, 6543);
        Ok(())
    }

    #[test]
    fn test_parse_port_invalid() {
        assert!(parse_port("not-a-port").is_err());
        assert!(parse_port("70000").is_err());
        assert!(parse_port("").is_err());
    }

    #[test]
    fn test_from_env_defaults() -> anyhow::Result<()> {
        // None of the PGFLEET_* variables are set in the test environment,
        // so the deployment defaults apply.
        let config = AppConfig::from_env()?;
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 5432);
        assert_eq!(config.server.user, "postgres");
        assert_eq!(config.storage.bucket, "kmf-db");
        assert_eq!(config.storage.region, "ap-south-1");
        Ok(())
    }
}
