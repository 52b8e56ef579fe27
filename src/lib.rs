pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::{apply_suffix, map_destination, FileMapping};
pub use services::{
    copy_matched_files, discover_mappings, BulkCopyConfig, BulkCopyReport, CopiedFile,
    CopyError, DiscoveryError, PathMappings,
};

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub copy: BulkCopyConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            copy: BulkCopyConfig::default(),
            log_level: "info".to_string(),
        }
    }
}
