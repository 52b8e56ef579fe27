use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy file from source to destination
/// Pure function (except for file system operations)
pub fn copy_file_safe<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    overwrite: bool,
) -> Result<bool> {
    let src_path = source.as_ref();
    let dest_path = destination.as_ref();

    if !src_path.exists() {
        anyhow::bail!("Source file does not exist: {:?}", src_path);
    }

    if dest_path.exists() && !overwrite {
        return Ok(false); // File already exists, skip
    }

    // Create destination directory if it doesn't exist
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    fs::copy(src_path, dest_path)
        .with_context(|| format!("Failed to copy file from {:?} to {:?}", src_path, dest_path))?;

    Ok(true)
}

/// Check if file was modified since the given date
/// Pure function (except for file system access)
pub fn matches_modification_window(
    path: &Path,
    modified_since: Option<DateTime<Utc>>,
) -> Result<bool> {
    let Some(since) = modified_since else {
        return Ok(true);
    };

    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for: {:?}", path))?;

    let modified = metadata
        .modified()
        .with_context(|| format!("Failed to get modification time for: {:?}", path))?;

    let modified_datetime = DateTime::<Utc>::from(modified);

    Ok(modified_datetime >= since)
}

/// Result of a file copy operation
#[derive(Debug, Clone)]
pub enum CopyResult {
    Success {
        source: PathBuf,
        destination: PathBuf,
    },
    Skipped {
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },
    Error {
        source: PathBuf,
        destination: PathBuf,
        error: String,
    },
}

impl CopyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CopyResult::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CopyResult::Error { .. })
    }
}

/// Functional utilities for file operations
pub mod functional {
    use super::*;

    /// Reduce copy results to (success, skipped, error) counts
    pub fn reduce_copy_results(results: &[CopyResult]) -> (usize, usize, usize) {
        results
            .iter()
            .fold((0, 0, 0), |(success, skip, error), result| match result {
                CopyResult::Success { .. } => (success + 1, skip, error),
                CopyResult::Skipped { .. } => (success, skip + 1, error),
                CopyResult::Error { .. } => (success, skip, error + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_safe_copies_bytes_and_creates_parents() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("scan.dcm");
        fs::write(&source, b"0123456789").unwrap();

        let destination = dir.path().join("out/a/scan.bak.dcm");
        let copied = copy_file_safe(&source, &destination, true).unwrap();

        assert!(copied);
        assert_eq!(fs::read(&destination).unwrap(), b"0123456789");
    }

    #[test]
    fn test_copy_file_safe_skips_existing_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("scan.dcm");
        let destination = dir.path().join("scan.bak.dcm");
        fs::write(&source, b"new content").unwrap();
        fs::write(&destination, b"old content").unwrap();

        let copied = copy_file_safe(&source, &destination, false).unwrap();

        assert!(!copied);
        assert_eq!(fs::read(&destination).unwrap(), b"old content");
    }

    #[test]
    fn test_copy_file_safe_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("scan.dcm");
        let destination = dir.path().join("scan.bak.dcm");
        fs::write(&source, b"new content").unwrap();
        fs::write(&destination, b"old content").unwrap();

        let copied = copy_file_safe(&source, &destination, true).unwrap();

        assert!(copied);
        assert_eq!(fs::read(&destination).unwrap(), b"new content");
    }

    #[test]
    fn test_copy_file_safe_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("missing.dcm");
        let destination = dir.path().join("missing.bak.dcm");

        assert!(copy_file_safe(&source, &destination, true).is_err());
        assert!(!destination.exists());
    }

    #[test]
    fn test_matches_modification_window() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.dcm");
        fs::write(&path, b"x").unwrap();

        // No window accepts everything
        assert!(matches_modification_window(&path, None).unwrap());

        // A freshly written file sits inside a one-day window
        let since = Utc::now() - chrono::Duration::days(1);
        assert!(matches_modification_window(&path, Some(since)).unwrap());

        // A window starting in the future excludes it
        let since = Utc::now() + chrono::Duration::days(1);
        assert!(!matches_modification_window(&path, Some(since)).unwrap());
    }

    #[test]
    fn test_reduce_copy_results() {
        let results = vec![
            CopyResult::Success {
                source: PathBuf::from("a"),
                destination: PathBuf::from("b"),
            },
            CopyResult::Skipped {
                source: PathBuf::from("c"),
                destination: PathBuf::from("d"),
                reason: "destination already exists".to_string(),
            },
            CopyResult::Error {
                source: PathBuf::from("e"),
                destination: PathBuf::from("f"),
                error: "boom".to_string(),
            },
        ];

        assert_eq!(functional::reduce_copy_results(&results), (1, 1, 1));
    }
}
