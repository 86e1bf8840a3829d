//! Utility functions

pub mod encoding;
pub mod paths;

pub use encoding::read_file_safe;
pub use paths::resolve_path;
