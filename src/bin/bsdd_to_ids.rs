//! Generate an IDS file from a bSDD dictionary URI.
//!
//! # Usage
//!
//! ```bash
//! bsdd_to_ids out.ids https://identifier.buildingsmart.org/uri/volkerwesselsbvgo/basis_bouwproducten_oene/latest
//! bsdd_to_ids out.ids <dictionary_uri> --version 0.9.7 --use_cache
//! ```

use anyhow::Result;
use bsdd_ids::bsdd::{BsddClient, DiskCache};
use bsdd_ids::forward::translate_dictionary;
use bsdd_ids::ids::{writer, IdsVersion};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "bsdd_to_ids")]
#[command(about = "Generate an IDS file from a bSDD dictionary URI")]
struct Cli {
    /// The filepath for the IDS file
    ids_file_path: PathBuf,

    /// The URI for the dictionary
    dictionary_uri: String,

    /// The IDS version
    #[arg(short = 'v', long = "version", value_enum, default_value_t = VersionArg::V1_0)]
    version: VersionArg,

    /// Use local cache
    #[arg(short = 'c', long = "use_cache")]
    use_cache: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VersionArg {
    #[value(name = "1.0")]
    V1_0,
    #[value(name = "0.9.7")]
    V0_9_7,
}

impl From<VersionArg> for IdsVersion {
    fn from(version: VersionArg) -> Self {
        match version {
            VersionArg::V1_0 => IdsVersion::V1_0,
            VersionArg::V0_9_7 => IdsVersion::V0_9_7,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut client = BsddClient::new()?;
    if cli.use_cache {
        client = client.with_cache(DiskCache::new("cache")?);
    }

    let ids = translate_dictionary(&mut client, &cli.dictionary_uri)?;
    writer::write_file(&ids, cli.version.into(), &cli.ids_file_path)?;

    info!(
        path = %cli.ids_file_path.display(),
        specifications = ids.specifications.len(),
        "IDS document written"
    );
    Ok(())
}
