//! SHA-256 content digests.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::Result;

/// Hex-encode a SHA-256 digest over the given bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut output = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(output, "{:02x}", byte);
    }
    output
}

/// Digest a file by reading its entire content.
///
/// Peak memory scales with the file size; manifest sources are expected to be
/// ordinary repository files, not multi-gigabyte archives.
pub fn sha256_file(path: &Path) -> Result<String> {
    let content = fs::read(path)?;
    Ok(sha256_hex(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HI_SHA256: &str = "8f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4";

    #[test]
    fn known_digest() {
        assert_eq!(sha256_hex(b"hi"), HI_SHA256);
    }

    #[test]
    fn deterministic_and_content_sensitive() {
        assert_eq!(sha256_hex(b"content"), sha256_hex(b"content"));
        assert_ne!(sha256_hex(b"content"), sha256_hex(b"contenT"));
    }

    #[test]
    fn file_digest_matches_byte_digest() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("a.txt");
        std::fs::write(&path, b"hi")?;

        assert_eq!(sha256_file(&path).unwrap(), HI_SHA256);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(sha256_file(&temp_dir.path().join("gone")).is_err());
    }
}
