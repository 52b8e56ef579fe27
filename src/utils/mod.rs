pub mod file_operations;

pub use file_operations::{
    copy_file_safe, matches_modification_window, CopyResult,
};
