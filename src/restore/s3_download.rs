// pgfleet/src/restore/s3_download.rs
use anyhow::{Context, Result};
use aws_sdk_s3 as s3;
use s3::config::Region;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::StorageConfig;

async fn build_client(storage: &StorageConfig) -> s3::Client {
    let sdk_config = aws_config::defaults(s3::config::BehaviorVersion::latest())
        .region(Region::new(storage.region.clone()))
        .load()
        .await;
    s3::Client::new(&sdk_config)
}

/// Lists the backup object keys stored under a run prefix.
///
/// A single ListObjectsV2 page only. A prefix holding more objects than one
/// page returns a truncated set.
pub async fn list_backup_keys(storage: &StorageConfig, key_prefix: &str) -> Result<Vec<String>> {
    println!(
        "Listing backup files under s3://{}/{}...",
        storage.bucket, key_prefix
    );

    let client = build_client(storage).await;

    let output = client
        .list_objects_v2()
        .bucket(&storage.bucket)
        .prefix(key_prefix)
        .send()
        .await
        .with_context(|| {
            format!(
                "Failed to list objects under s3://{}/{}",
                storage.bucket, key_prefix
            )
        })?;

    let keys: Vec<String> = output
        .contents()
        .iter()
        .filter_map(|object| object.key().map(str::to_string))
        .collect();

    println!("Found {} backup file(s).", keys.len());
    Ok(keys)
}

/// Downloads one object to `destination_path`, creating or truncating it.
pub async fn download_file_from_s3(
    storage: &StorageConfig,
    s3_key: &str,
    destination_path: &Path,
) -> Result<PathBuf> {
    println!(
        "Attempting to download s3://{}/{} to {}",
        storage.bucket,
        s3_key,
        destination_path.display()
    );

    if let Some(parent_dir) = destination_path.parent() {
        if !parent_dir.exists() {
            tokio::fs::create_dir_all(parent_dir).await.with_context(|| {
                format!(
                    "Failed to create directory for download: {}",
                    parent_dir.display()
                )
            })?;
        }
    }

    let client = build_client(storage).await;

    let mut output_file = File::create(destination_path).await.with_context(|| {
        format!(
            "Failed to create destination file: {}",
            destination_path.display()
        )
    })?;

    let mut object = client
        .get_object()
        .bucket(&storage.bucket)
        .key(s3_key)
        .send()
        .await
        .with_context(|| format!("Failed to get object s3://{}/{}", storage.bucket, s3_key))?;

    let mut total_bytes_downloaded = 0;
    while let Some(bytes_chunk) = object
        .body
        .try_next()
        .await
        .with_context(|| format!("Failed to read body of s3://{}/{}", storage.bucket, s3_key))?
    {
        output_file.write_all(&bytes_chunk).await.with_context(|| {
            format!(
                "Failed to write to destination file: {}",
                destination_path.display()
            )
        })?;
        total_bytes_downloaded += bytes_chunk.len();
    }
    output_file.flush().await.with_context(|| {
        format!(
            "Failed to flush destination file: {}",
            destination_path.display()
        )
    })?;

    println!(
        "✅ Successfully downloaded {} bytes from s3://{}/{} to {}",
        total_bytes_downloaded,
        storage.bucket,
        s3_key,
        destination_path.display()
    );
    Ok(destination_path.to_path_buf())
}
