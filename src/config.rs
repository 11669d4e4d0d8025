//! Run configuration: command-line flags merged with an optional TOML file

use crate::cli::Args;
use crate::engine::{EmptyClusterPolicy, EngineConfig};
use crate::normalize::ZeroVariancePolicy;
use crate::schema::{Attribute, AttributeSchema};
use crate::sink::{DEFAULT_PLAYLIST_DESCRIPTION, DEFAULT_PLAYLIST_NAME};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub k: Option<usize>,
    pub passes: Option<usize>,
    pub seed: Option<u64>,
    pub zero_variance: Option<ZeroVariancePolicy>,
    pub empty_cluster: Option<EmptyClusterPolicy>,

    pub playlist: Option<PlaylistConfig>,
    /// Attribute name -> weight
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PlaylistConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: EngineConfig,
    pub schema: AttributeSchema,
    pub zero_variance: ZeroVariancePolicy,
    pub seed: Option<u64>,
    pub playlist_name: String,
    pub playlist_description: String,
    pub playlist_public: bool,
}

impl Settings {
    /// Resolve settings from CLI arguments and an optional file config.
    /// File values override CLI values where present.
    pub fn resolve(args: &Args, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let playlist = file.playlist.unwrap_or_default();

        let engine = EngineConfig {
            k: file.k.unwrap_or(args.clusters),
            passes: file.passes.unwrap_or(args.passes),
            empty_cluster: file.empty_cluster.unwrap_or_default(),
        };
        if engine.k == 0 {
            bail!("Number of clusters must be at least 1");
        }

        let mut schema = AttributeSchema::default();
        for (attribute, weight) in args.parse_weights()? {
            schema = schema.with_weight(attribute, weight)?;
        }
        for (name, weight) in file.weights.unwrap_or_default() {
            let Some(attribute) = Attribute::from_name(&name) else {
                bail!("Unknown attribute in [weights]: {}", name);
            };
            schema = schema.with_weight(attribute, weight)?;
        }

        Ok(Self {
            engine,
            schema,
            zero_variance: file.zero_variance.unwrap_or_default(),
            seed: file.seed.or(args.seed),
            playlist_name: playlist
                .name
                .or_else(|| args.name.clone())
                .unwrap_or_else(|| DEFAULT_PLAYLIST_NAME.to_string()),
            playlist_description: playlist
                .description
                .unwrap_or_else(|| DEFAULT_PLAYLIST_DESCRIPTION.to_string()),
            playlist_public: playlist.public.unwrap_or(false),
        })
    }
}
