//! Convert an IDS file to the bSDD import JSON format.
//!
//! # Usage
//!
//! ```bash
//! ids_to_bsdd input.ids output.json volkerwesselsbvgo --change_request_email me@example.org
//! ```

use anyhow::{Context, Result};
use bsdd_ids::ids::reader;
use bsdd_ids::reverse::{translate_ids, ReverseOptions};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ids_to_bsdd")]
#[command(about = "Convert an IDS file to the bSDD import JSON format")]
struct Cli {
    /// Path to the input IDS file
    input_file: PathBuf,

    /// Path to the output JSON file
    output_file: PathBuf,

    /// Organization code owning the produced dictionary
    organization_code: String,

    /// Change request email address
    #[arg(long = "change_request_email")]
    change_request_email: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let xml = fs::read_to_string(&cli.input_file)
        .with_context(|| format!("Failed to read {}", cli.input_file.display()))?;
    let ids = reader::parse_str(&xml)
        .with_context(|| format!("Failed to parse {}", cli.input_file.display()))?;

    let import = translate_ids(
        &ids,
        &ReverseOptions {
            organization_code: cli.organization_code,
            change_request_email: cli.change_request_email,
        },
    );

    let json = serde_json::to_string_pretty(&import)?;
    fs::write(&cli.output_file, json)
        .with_context(|| format!("Failed to write {}", cli.output_file.display()))?;

    info!(
        path = %cli.output_file.display(),
        classes = import.classes.len(),
        properties = import.properties.len(),
        "bSDD import document written"
    );
    Ok(())
}
