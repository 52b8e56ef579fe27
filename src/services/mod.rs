pub mod bulk_copy;
pub mod discovery;

pub use bulk_copy::{
    copy_matched_files, BulkCopyConfig, BulkCopyReport, CopiedFile, CopyError,
};
pub use discovery::{discover_mappings, DiscoveryError, PathMappings};
