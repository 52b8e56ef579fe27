pub mod mapping;

pub use mapping::{apply_suffix, map_destination, FileMapping};
