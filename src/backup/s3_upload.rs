// pgfleet/src/backup/s3_upload.rs
use anyhow::{Context, Result};
use aws_sdk_s3 as s3;
use s3::config::Region;
use s3::primitives::ByteStream;
use s3::types::ObjectCannedAcl;
use std::path::Path;

use crate::config::StorageConfig;
use crate::naming;

/// Uploads a local backup artifact to S3 under `<key_prefix>/<basename>`.
///
/// The object is stored with a private canned ACL. Returns the full key.
pub async fn upload_file_to_s3(
    storage: &StorageConfig,
    file_path: &Path,
    key_prefix: &str,
) -> Result<String> {
    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| {
            format!(
                "Backup file path has no valid filename: {}",
                file_path.display()
            )
        })?;
    let s3_key = naming::object_key(key_prefix, filename);

    println!(
        "Attempting to upload {} to S3 bucket {} with key {}",
        file_path.display(),
        storage.bucket,
        s3_key
    );

    let sdk_config = aws_config::defaults(s3::config::BehaviorVersion::latest())
        .region(Region::new(storage.region.clone()))
        .load()
        .await;
    let client = s3::Client::new(&sdk_config);

    let body = ByteStream::from_path(file_path).await.with_context(|| {
        format!(
            "Failed to create ByteStream from file: {}",
            file_path.display()
        )
    })?;

    client
        .put_object()
        .bucket(&storage.bucket)
        .key(&s3_key)
        .acl(ObjectCannedAcl::Private)
        .body(body)
        .send()
        .await
        .with_context(|| {
            format!(
                "Failed to upload file {} to s3://{}/{}",
                file_path.display(),
                storage.bucket,
                s3_key
            )
        })?;

    println!(
        "✅ Backup successful: {} uploaded to s3://{}/{}",
        filename, storage.bucket, s3_key
    );
    Ok(s3_key)
}
