//! S3 backend: prefix-scoped listing of a bucket.
//!
//! Pages through ListObjectsV2 under a key prefix and produces one manifest
//! record per object, in listing-page order. The actual client code is gated
//! behind the `s3` cargo feature; without it, dispatching an `s3://` root
//! fails up front with an installation hint.

use clap::ValueEnum;

use crate::filter::ExcludeFilter;
use crate::manifest::{ManifestRecord, MANIFEST_NAME};
use crate::{ManifestError, Result};

const S3_SCHEME: &str = "s3://";

/// Whether the given root should be handled by the S3 backend.
pub fn is_s3_uri(root: &str) -> bool {
    root.starts_with(S3_SCHEME)
}

/// Where a remote object's digest comes from.
///
/// The two sources produce incompatible manifest formats: `computed` yields a
/// SHA-256 over the downloaded content, `etag` yields the storage system's own
/// integrity tag, which is a different algorithm and length for multipart
/// uploads. A deployed manifest consumer must be configured for exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DigestSource {
    /// Download each object and hash its content with SHA-256.
    Computed,
    /// Use the listing's ETag, with surrounding quotes stripped.
    Etag,
}

/// A parsed `s3://bucket/prefix` root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Uri {
    pub bucket: String,
    pub prefix: String,
}

impl S3Uri {
    /// Parse an `s3://bucket/prefix` URI. The prefix may be empty and never
    /// keeps a leading slash.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix(S3_SCHEME)
            .ok_or_else(|| ManifestError::InvalidUri(uri.to_string()))?;

        let (bucket, prefix) = match rest.split_once('/') {
            Some((bucket, prefix)) => (bucket, prefix.trim_start_matches('/')),
            None => (rest, ""),
        };

        if bucket.is_empty() {
            return Err(ManifestError::InvalidUri(uri.to_string()));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// Strip the listing prefix and any leading slash from an object key.
fn relative_key(key: &str, prefix: &str) -> String {
    key.strip_prefix(prefix)
        .unwrap_or(key)
        .trim_start_matches('/')
        .to_string()
}

/// Whether an object key belongs in the manifest.
fn include_key(key: &str, filter: &ExcludeFilter) -> bool {
    key != MANIFEST_NAME && !filter.is_excluded(key)
}

/// List every object under the prefix and build manifest records.
///
/// The exclusion filter is matched against the full object key. Listing and
/// read failures abort the run; nothing is retried.
#[cfg(feature = "s3")]
pub async fn traverse_s3(
    uri: &S3Uri,
    filter: &ExcludeFilter,
    digest_source: DigestSource,
) -> Result<Vec<ManifestRecord>> {
    use aws_config::BehaviorVersion;
    use aws_sdk_s3::error::DisplayErrorContext;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&config);

    let mut records = Vec::new();
    let mut pages = client
        .list_objects_v2()
        .bucket(&uri.bucket)
        .set_prefix((!uri.prefix.is_empty()).then(|| uri.prefix.clone()))
        .into_paginator()
        .send();

    while let Some(page) = pages.next().await {
        let page = page.map_err(|err| {
            ManifestError::Storage(format!(
                "listing bucket {} failed: {}",
                uri.bucket,
                DisplayErrorContext(&err)
            ))
        })?;

        for object in page.contents() {
            let Some(key) = object.key() else {
                continue;
            };
            if !include_key(key, filter) {
                continue;
            }

            let digest = match digest_source {
                DigestSource::Computed => {
                    let output = client
                        .get_object()
                        .bucket(&uri.bucket)
                        .key(key)
                        .send()
                        .await
                        .map_err(|err| {
                            ManifestError::Storage(format!(
                                "reading object {key} failed: {}",
                                DisplayErrorContext(&err)
                            ))
                        })?;
                    let body = output.body.collect().await.map_err(|err| {
                        ManifestError::Storage(format!("reading object {key} failed: {err}"))
                    })?;
                    crate::digest::sha256_hex(&body.into_bytes())
                }
                DigestSource::Etag => object.e_tag().unwrap_or_default().trim_matches('"').to_string(),
            };

            records.push(ManifestRecord {
                relative_path: relative_key(key, &uri.prefix),
                digest,
                size: object.size().unwrap_or_default().max(0) as u64,
            });
        }
    }

    Ok(records)
}

#[cfg(not(feature = "s3"))]
pub async fn traverse_s3(
    _uri: &S3Uri,
    _filter: &ExcludeFilter,
    _digest_source: DigestSource,
) -> Result<Vec<ManifestRecord>> {
    Err(ManifestError::Config(
        "S3 support is not compiled in; reinstall with `cargo install pulp-manifest --features s3`"
            .to_string(),
    ))
}
