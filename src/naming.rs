// pgfleet/src/naming.rs
//! Artifact naming: the filename is the only record correlating a stored
//! object back to its source database, so encode and decode must stay in
//! lockstep across the backup/restore boundary.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

/// `YYYYMMDD_HHMMSS`, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const NAME_SEPARATOR: &str = "_backup_";
const EXTENSION: &str = ".sql";

/// Builds the artifact filename for one database capture:
/// `<db>_backup_YYYYMMDD_HHMMSS.sql`.
pub fn backup_filename(db_name: &str, captured_at: NaiveDateTime) -> String {
    format!(
        "{}{}{}{}",
        db_name,
        NAME_SEPARATOR,
        captured_at.format(TIMESTAMP_FORMAT),
        EXTENSION
    )
}

/// Recovers the database name from an artifact filename.
///
/// Parses the structure instead of stripping a fixed number of bytes: the
/// name is whatever precedes the last `_backup_<timestamp>.sql` tail, and
/// the timestamp must actually parse as [`TIMESTAMP_FORMAT`]. A filename
/// that does not fit the scheme is an error, never a garbage name.
pub fn decode_database_name(filename: &str) -> Result<String> {
    let stem = filename.strip_suffix(EXTENSION).with_context(|| {
        format!("Backup filename does not end in '{}': {}", EXTENSION, filename)
    })?;
    let (db_name, timestamp) = stem.rsplit_once(NAME_SEPARATOR).with_context(|| {
        format!(
            "Backup filename has no '{}' separator: {}",
            NAME_SEPARATOR, filename
        )
    })?;
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).with_context(|| {
        format!(
            "Backup filename carries a malformed timestamp '{}': {}",
            timestamp, filename
        )
    })?;
    if db_name.is_empty() {
        anyhow::bail!("Backup filename has an empty database name: {}", filename);
    }
    Ok(db_name.to_string())
}

/// Joins a run prefix and an artifact filename into the object key.
pub fn object_key(key_prefix: &str, filename: &str) -> String {
    format!("{}/{}", key_prefix, filename)
}

/// Last path segment of an object key.
pub fn filename_from_key(s3_key: &str) -> &str {
    s3_key.rsplit('/').next().unwrap_or(s3_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_backup_filename_format() {
        let filename = backup_filename("admindb", ts(2023, 11, 14, 12, 0, 0));
        assert_eq!(filename, "admindb_backup_20231114_120000.sql");
    }

    #[test]
    fn test_decode_known_filename() -> anyhow::Result<()> {
        assert_eq!(
            decode_database_name("admindb_backup_20231114_120000.sql")?,
            "admindb"
        );
        Ok(())
    }

    #[test]
    fn test_encode_decode_round_trip() -> anyhow::Result<()> {
        let captured_at = ts(2024, 2, 29, 23, 59, 59);
        for name in ["userdb", "agent_db", "a", "db-with-dash", "weird_backup_db"] {
            let filename = backup_filename(name, captured_at);
            assert_eq!(decode_database_name(&filename)?, name);
        }
        Ok(())
    }

    #[test]
    fn test_decode_name_containing_separator() -> anyhow::Result<()> {
        // The split is on the LAST separator, so names containing
        // "_backup_" survive as long as the tail is the real timestamp.
        let filename = backup_filename("audit_backup_archive", ts(2023, 1, 2, 3, 4, 5));
        assert_eq!(filename, "audit_backup_archive_backup_20230102_030405.sql");
        assert_eq!(decode_database_name(&filename)?, "audit_backup_archive");
        Ok(())
    }

    #[test]
    fn test_decode_rejects_malformed_names() {
        assert!(decode_database_name("admindb_backup_20231114_120000.dump").is_err());
        assert!(decode_database_name("admindb.sql").is_err());
        assert!(decode_database_name("admindb_backup_not_a_time.sql").is_err());
        assert!(decode_database_name("_backup_20231114_120000.sql").is_err());
        assert!(decode_database_name("").is_err());
    }

    #[test]
    fn test_object_key_layout() {
        let captured_at = ts(2023, 11, 14, 12, 0, 0);
        let keys: Vec<String> = ["admindb", "agentdb", "userdb"]
            .iter()
            .map(|db| object_key("1700000000", &backup_filename(db, captured_at)))
            .collect();
        assert_eq!(
            keys,
            vec![
                "1700000000/admindb_backup_20231114_120000.sql",
                "1700000000/agentdb_backup_20231114_120000.sql",
                "1700000000/userdb_backup_20231114_120000.sql",
            ]
        );
    }

    #[test]
    fn test_filename_from_key() {
        assert_eq!(
            filename_from_key("1700000000/admindb_backup_20231114_120000.sql"),
            "admindb_backup_20231114_120000.sql"
        );
        assert_eq!(filename_from_key("bare_filename.sql"), "bare_filename.sql");
    }
}
