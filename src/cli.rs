//! Command-line interface definitions and argument parsing

use crate::engine::{DEFAULT_K, DEFAULT_PASSES};
use crate::schema::Attribute;
use clap::Parser;
use std::path::PathBuf;

/// Pick a small, artist-diverse set of representative tracks from a library
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON library export (tracks plus audio features)
    #[arg(short, long, default_value = "library.json")]
    pub input: PathBuf,

    /// Number of clusters, and so of picked tracks
    #[arg(short = 'k', long, default_value_t = DEFAULT_K)]
    pub clusters: usize,

    /// Number of assignment + refitting passes
    #[arg(long, default_value_t = DEFAULT_PASSES)]
    pub passes: usize,

    /// Seed for the initial centroid selection, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional TOML config file; its values take precedence over flags
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the resulting playlist as JSON to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the created playlist
    #[arg(long)]
    pub name: Option<String>,

    /// Attribute weight override, e.g. --weight tempo=2.0 (repeatable)
    #[arg(short, long = "weight")]
    pub weights: Vec<String>,

    /// Print every cluster with its members
    #[arg(long)]
    pub show_clusters: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse `--weight` values
    /// Expected format: "attribute=weight"
    pub fn parse_weights(&self) -> crate::Result<Vec<(Attribute, f64)>> {
        self.weights
            .iter()
            .map(|entry| {
                let (name, weight) = entry
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("Weight must be in format 'attribute=weight': {}", entry))?;

                let attribute = Attribute::from_name(name.trim())
                    .ok_or_else(|| anyhow::anyhow!("Unknown attribute: {}", name))?;
                let weight: f64 = weight
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid weight value: {}", weight))?;

                Ok((attribute, weight))
            })
            .collect()
    }
}
