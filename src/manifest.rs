//! Manifest records and serialization.
//!
//! A manifest is an ordered list of `relative_path,digest,size` lines, one per
//! enumerated file, in traversal order. Paths containing commas are written
//! as-is; the format performs no escaping.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Result;

/// Reserved output file name. Never listed as a manifest entry itself.
pub const MANIFEST_NAME: &str = "PULP_MANIFEST";

/// One line of the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    /// Path relative to the scanned root, forward-slash separated, no leading slash.
    pub relative_path: String,

    /// Hex-encoded content checksum.
    pub digest: String,

    /// Byte length of the file content.
    pub size: u64,
}

impl ManifestRecord {
    pub fn as_line(&self) -> String {
        format!("{},{},{}", self.relative_path, self.digest, self.size)
    }
}

/// Write the manifest records to `path`, overwriting any existing file.
pub fn write_manifest(path: &Path, records: &[ManifestRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writer.write_all(record.as_line().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Remove a stale `PULP_MANIFEST` inside the given root, if present.
///
/// All removal errors are swallowed: a missing file is the normal case, and
/// permission oddities must not stop a fresh generation.
pub fn remove_stale_manifest(root: &str) {
    let stale = Path::new(root).join(MANIFEST_NAME);
    if let Err(err) = fs::remove_file(&stale) {
        tracing::debug!("No stale manifest removed at {}: {}", stale.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(path: &str, digest: &str, size: u64) -> ManifestRecord {
        ManifestRecord {
            relative_path: path.to_string(),
            digest: digest.to_string(),
            size,
        }
    }

    #[test]
    fn line_format() {
        let rec = record("sub/a.txt", "abc123", 42);
        assert_eq!(rec.as_line(), "sub/a.txt,abc123,42");
    }

    #[test]
    fn writes_one_line_per_record_in_order() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let out = temp_dir.path().join(MANIFEST_NAME);

        let records = vec![record("b.bin", "dd", 1), record("a.txt", "ee", 2)];
        write_manifest(&out, &records).unwrap();

        let content = fs::read_to_string(&out)?;
        assert_eq!(content, "b.bin,dd,1\na.txt,ee,2\n");
        Ok(())
    }

    #[test]
    fn overwrites_existing_output() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let out = temp_dir.path().join(MANIFEST_NAME);
        fs::write(&out, "old content\n")?;

        write_manifest(&out, &[record("a.txt", "ff", 3)]).unwrap();

        assert_eq!(fs::read_to_string(&out)?, "a.txt,ff,3\n");
        Ok(())
    }

    #[test]
    fn empty_manifest_is_an_empty_file() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let out = temp_dir.path().join(MANIFEST_NAME);

        write_manifest(&out, &[]).unwrap();

        assert_eq!(fs::read_to_string(&out)?, "");
        Ok(())
    }

    #[test]
    fn stale_removal_ignores_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        // Must not panic or error when there is nothing to remove.
        remove_stale_manifest(temp_dir.path().to_str().unwrap());
    }

    #[test]
    fn stale_removal_deletes_existing_manifest() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let stale = temp_dir.path().join(MANIFEST_NAME);
        fs::write(&stale, "stale\n")?;

        remove_stale_manifest(temp_dir.path().to_str().unwrap());

        assert!(!stale.exists());
        Ok(())
    }
}
