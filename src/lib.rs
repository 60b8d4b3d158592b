//! PULP_MANIFEST generator library.
//!
//! Enumerates every file under a local directory or an S3 bucket prefix and
//! records each file's relative path, SHA-256 digest, and byte size.

pub mod digest;
pub mod filter;
pub mod fs;
pub mod manifest;
pub mod s3;
pub mod utils;

// Re-export commonly used types
pub use filter::ExcludeFilter;
pub use manifest::{ManifestRecord, MANIFEST_NAME};
pub use utils::errors::ManifestError;
pub type Result<T> = std::result::Result<T, ManifestError>;
