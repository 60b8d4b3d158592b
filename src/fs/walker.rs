//! Directory traversal for the local backend.
//!
//! Recursively enumerates every regular file under a root directory, following
//! symbolic links to directories, and produces one manifest record per file in
//! directory-iteration order.

use std::path::Path;

use walkdir::WalkDir;

use crate::digest;
use crate::filter::ExcludeFilter;
use crate::manifest::ManifestRecord;
use crate::Result;

/// Walk `root` and build manifest records for every file not excluded.
///
/// The exclusion filter is matched against each file's base name. Relative
/// paths use forward-slash separators regardless of platform. Any walk or
/// read error aborts the traversal; no partial result is returned.
pub fn traverse_dir(root: &Path, filter: &ExcludeFilter) -> Result<Vec<ManifestRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if filter.is_excluded(&file_name) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative_path = normalize_path(relative);

        let digest = digest::sha256_file(entry.path())?;
        // Size comes from metadata, not from counting read bytes.
        let size = entry.metadata()?.len();

        records.push(ManifestRecord {
            relative_path,
            digest,
            size,
        });
    }

    Ok(records)
}

/// Join path components with forward slashes.
fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
