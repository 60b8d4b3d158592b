//! pulp-manifest - Main entry point
//!
//! Generates a PULP_MANIFEST file for a given directory or S3 bucket path.

use std::path::Path;

use clap::Parser;
use pulp_manifest::s3::{self, DigestSource, S3Uri};
use pulp_manifest::{filter::ExcludeFilter, fs, manifest, utils, Result, MANIFEST_NAME};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory path or s3://bucket/prefix URI to enumerate
    root: String,

    /// Exclude files or objects matching the given glob pattern (matched as *PATTERN*)
    #[arg(short, long, visible_alias = "filter", value_name = "PATTERN")]
    exclude: Option<String>,

    /// Digest source for S3 objects
    #[arg(long, value_enum, default_value_t = DigestSource::Computed)]
    digest_source: DigestSource,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    utils::logger::init(&args.log_level);

    if let Err(err) = run(&args).await {
        tracing::error!(
            "Couldn't generate {} for {} ({})",
            MANIFEST_NAME,
            args.root,
            err
        );
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let filter = ExcludeFilter::new(args.exclude.as_deref())?;

    // A manifest left over from a previous run must not end up listed in the
    // new one.
    manifest::remove_stale_manifest(&args.root);

    let records = if s3::is_s3_uri(&args.root) {
        tracing::info!(
            "Generating {} for S3 bucket: {} with exclude: {:?}",
            MANIFEST_NAME,
            args.root,
            args.exclude
        );
        let uri = S3Uri::parse(&args.root)?;
        s3::traverse_s3(&uri, &filter, args.digest_source).await?
    } else {
        tracing::info!("Generating {} for directory: {}", MANIFEST_NAME, args.root);
        fs::traverse_dir(Path::new(&args.root), &filter)?
    };

    manifest::write_manifest(Path::new(MANIFEST_NAME), &records)?;
    tracing::info!("Wrote {} records to {}", records.len(), MANIFEST_NAME);

    Ok(())
}
