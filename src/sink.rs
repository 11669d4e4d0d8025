//! Destination for the selected tracks

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_PLAYLIST_NAME: &str = "7 deadly songs!";
pub const DEFAULT_PLAYLIST_DESCRIPTION: &str =
    "A nice little selection of 7 songs to share with your friends.";

/// A playlist to be created, tracks in selection order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub track_ids: Vec<String>,
}

impl NewPlaylist {
    pub fn new(track_ids: Vec<String>) -> Self {
        Self {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            description: DEFAULT_PLAYLIST_DESCRIPTION.to_string(),
            public: false,
            track_ids,
        }
    }
}

/// Anything that can create a playlist from track ids
pub trait PlaylistSink {
    /// Create the playlist and return where it can be found
    fn create_playlist(&self, playlist: &NewPlaylist) -> crate::Result<String>;
}

/// Writes playlists as pretty-printed JSON files
#[derive(Debug, Clone)]
pub struct JsonPlaylistWriter {
    path: PathBuf,
}

impl JsonPlaylistWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlaylistSink for JsonPlaylistWriter {
    fn create_playlist(&self, playlist: &NewPlaylist) -> crate::Result<String> {
        let json = serde_json::to_string_pretty(playlist)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write playlist to {:?}", self.path))?;
        info!(
            "Wrote playlist \"{}\" with {} tracks to {:?}",
            playlist.name,
            playlist.track_ids.len(),
            self.path
        );
        Ok(self.path.display().to_string())
    }
}
