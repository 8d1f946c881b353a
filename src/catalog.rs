// pgfleet/src/catalog.rs
use anyhow::{Context, Result};
use sqlx::{Connection, PgConnection, Row};

use crate::config::ServerConfig;

/// Lists every non-template database on the server, in catalog order.
///
/// Connects to the `postgres` maintenance database. Any connection or query
/// failure is fatal to the whole run: there is no partial enumeration.
pub async fn list_databases(server: &ServerConfig) -> Result<Vec<String>> {
    println!(
        "Fetching list of databases from {}:{}...",
        server.host, server.port
    );

    let admin_url = format!(
        "postgres://{}:{}@{}:{}/postgres",
        server.user, server.password, server.host, server.port
    );
    let mut conn = PgConnection::connect(&admin_url).await.with_context(|| {
        format!(
            "Failed to connect to 'postgres' database on {}:{} for listing databases",
            server.host, server.port
        )
    })?;

    let rows = sqlx::query("SELECT datname FROM pg_database WHERE datistemplate = false")
        .fetch_all(&mut conn)
        .await
        .context("Failed to fetch database list from pg_database")?;

    let db_names: Vec<String> = rows
        .iter()
        .map(|row| row.try_get("datname"))
        .collect::<Result<_, _>>()
        .context("Failed to get 'datname' from row when fetching database list")?;

    println!("Found databases: {:?}", db_names);
    Ok(db_names)
}
