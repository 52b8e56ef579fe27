use crate::models::FileMapping;
use crate::services::discovery::discover_mappings;
use crate::utils::{copy_file_safe, matches_modification_window, CopyResult};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

/// Configuration for the bulk copy operation
#[derive(Debug, Clone)]
pub struct BulkCopyConfig {
    pub pattern: String,
    pub suffix: String,
    pub overwrite: bool,
    pub days_back: Option<i64>,
}

impl Default for BulkCopyConfig {
    fn default() -> Self {
        Self {
            pattern: "**/*.dcm".to_string(),
            suffix: ".bak.dcm".to_string(),
            overwrite: true,
            days_back: None,
        }
    }
}

/// Main bulk copy operation: discover matching files under `inputdir` and
/// copy each one to its mapped destination under `outputdir`.
///
/// Files are processed one at a time. A failure on one file is recorded in
/// the report and the remaining files are still processed; the caller
/// decides whether a report with errors fails the run.
pub async fn copy_matched_files(
    inputdir: &Path,
    outputdir: &Path,
    config: &BulkCopyConfig,
) -> Result<BulkCopyReport> {
    info!("Starting bulk copy process...");

    let mappings = discover_mappings(inputdir, outputdir, &config.pattern, &config.suffix)?;

    if mappings.is_empty() {
        info!("No files matched pattern '{}'", config.pattern);
        return Ok(BulkCopyReport::empty());
    }

    info!(
        "Discovered {} files matching '{}'",
        mappings.len(),
        config.pattern
    );

    let modified_since = config.days_back.map(|days| Utc::now() - Duration::days(days));

    let mut results = Vec::with_capacity(mappings.len());

    for mapping in mappings {
        info!(
            "copying {} to {}",
            mapping.source.display(),
            mapping.destination.display()
        );

        let overwrite = config.overwrite;
        let (source, destination) = (mapping.source.clone(), mapping.destination.clone());

        let result = tokio::task::spawn_blocking(move || {
            copy_one_mapping(&mapping, overwrite, modified_since)
        })
        .await
        .unwrap_or_else(|e| CopyResult::Error {
            source,
            destination,
            error: format!("Task join error: {e}"),
        });

        results.push(result);
    }

    let report = create_copy_report(results);

    info!(
        "Bulk copy completed. Success: {}, Skipped: {}, Errors: {}",
        report.successful_copies,
        report.skipped_files,
        report.errors.len()
    );

    Ok(report)
}

/// Copy a single mapping, folding the age filter and the overwrite policy
/// into one per-file outcome.
fn copy_one_mapping(
    mapping: &FileMapping,
    overwrite: bool,
    modified_since: Option<DateTime<Utc>>,
) -> CopyResult {
    match matches_modification_window(&mapping.source, modified_since) {
        Ok(true) => {}
        Ok(false) => {
            return CopyResult::Skipped {
                source: mapping.source.clone(),
                destination: mapping.destination.clone(),
                reason: "outside modification window".to_string(),
            };
        }
        Err(e) => {
            return CopyResult::Error {
                source: mapping.source.clone(),
                destination: mapping.destination.clone(),
                error: e.to_string(),
            };
        }
    }

    match copy_file_safe(&mapping.source, &mapping.destination, overwrite) {
        Ok(true) => CopyResult::Success {
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
        },
        Ok(false) => CopyResult::Skipped {
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
            reason: "destination already exists".to_string(),
        },
        Err(e) => CopyResult::Error {
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
            error: e.to_string(),
        },
    }
}

/// Create a comprehensive report from copy results
fn create_copy_report(results: Vec<CopyResult>) -> BulkCopyReport {
    let mut successful_copies = 0;
    let mut skipped_files = 0;
    let mut errors = Vec::new();
    let mut copied_files = Vec::new();

    for result in results {
        match result {
            CopyResult::Success {
                source,
                destination,
            } => {
                successful_copies += 1;
                copied_files.push(CopiedFile {
                    source: source.to_string_lossy().to_string(),
                    destination: destination.to_string_lossy().to_string(),
                });
            }
            CopyResult::Skipped {
                source,
                destination,
                reason,
            } => {
                skipped_files += 1;
                tracing::debug!(
                    "Skipped copying {} to {}: {}",
                    source.display(),
                    destination.display(),
                    reason
                );
            }
            CopyResult::Error {
                source,
                destination,
                error,
            } => {
                error!(
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    error
                );
                errors.push(CopyError {
                    source: source.to_string_lossy().to_string(),
                    destination: destination.to_string_lossy().to_string(),
                    error,
                });
            }
        }
    }

    BulkCopyReport {
        successful_copies,
        skipped_files,
        copied_files,
        errors,
    }
}

/// Report structure for the bulk copy operation
#[derive(Debug, Clone, Serialize)]
pub struct BulkCopyReport {
    pub successful_copies: usize,
    pub skipped_files: usize,
    pub copied_files: Vec<CopiedFile>,
    pub errors: Vec<CopyError>,
}

impl BulkCopyReport {
    pub fn empty() -> Self {
        Self {
            successful_copies: 0,
            skipped_files: 0,
            copied_files: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn total_processed(&self) -> usize {
        self.successful_copies + self.skipped_files + self.errors.len()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_processed();
        if total == 0 {
            0.0
        } else {
            self.successful_copies as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CopiedFile {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyError {
    pub source: String,
    pub destination: String,
    pub error: String,
}
