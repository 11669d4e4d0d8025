//! Track metadata and audio features from an external source

use crate::error::ClusterError;
use crate::record::{AttributeValues, FeatureRecord};
use crate::schema::Attribute;
use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Largest number of ids the audio-features lookup accepts per call
pub const AUDIO_FEATURES_BATCH_LIMIT: usize = 100;

/// Track metadata as provided by the music service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub explicit: bool,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub release_date: String,
}

/// Audio analysis of a single track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub time_signature: u32,
    pub valence: f64,
}

/// Anything tracks and their audio features can be read from
pub trait TrackSource {
    fn tracks(&self) -> crate::Result<Vec<TrackItem>>;

    /// Features for at most [`AUDIO_FEATURES_BATCH_LIMIT`] ids, aligned with
    /// `ids`; `None` where a track has no analysis.
    fn audio_features(&self, ids: &[String]) -> crate::Result<Vec<Option<AudioFeatures>>>;
}

/// Read every track from `source` and turn it into a feature record
pub fn load_records<S: TrackSource + ?Sized>(source: &S) -> crate::Result<Vec<FeatureRecord>> {
    let items = source.tracks()?;
    let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();

    let mut features = Vec::with_capacity(ids.len());
    for (batch, chunk) in ids.chunks(AUDIO_FEATURES_BATCH_LIMIT).enumerate() {
        let fetched = source
            .audio_features(chunk)
            .with_context(|| format!("Failed to fetch audio features batch {}", batch))?;
        if fetched.len() != chunk.len() {
            anyhow::bail!(
                "Audio features batch {} returned {} entries for {} ids",
                batch,
                fetched.len(),
                chunk.len()
            );
        }
        debug!("Fetched audio features batch {} ({} ids)", batch, chunk.len());
        features.extend(fetched);
    }

    let records = items
        .into_iter()
        .zip(features)
        .map(|(item, features)| track_record(item, features.as_ref()))
        .collect::<Result<Vec<_>, ClusterError>>()?;

    info!("Loaded {} tracks", records.len());
    Ok(records)
}

/// Combine metadata and audio features into a feature record
pub fn track_record(
    item: TrackItem,
    features: Option<&AudioFeatures>,
) -> Result<FeatureRecord, ClusterError> {
    let year = parse_release_year(&item.release_date).ok_or_else(|| ClusterError::SchemaViolation {
        track_id: item.id.clone(),
        attribute: Attribute::Year,
        reason: "has an unreadable release date",
    })?;

    let mut builder = AttributeValues::builder()
        .category(Attribute::Explicit, item.explicit.to_string())
        .numeric(Attribute::Year, f64::from(year));

    if let Some(f) = features {
        builder = builder
            .category(Attribute::TimeSignature, f.time_signature.to_string())
            .numeric(Attribute::Acousticness, f.acousticness)
            .numeric(Attribute::Speechiness, f.speechiness)
            .numeric(Attribute::Danceability, f.danceability)
            .numeric(Attribute::Tempo, f.tempo)
            .numeric(Attribute::Instrumentalness, f.instrumentalness)
            .numeric(Attribute::Energy, f.energy)
            .numeric(Attribute::Valence, f.valence);
    }

    let values = builder.build(&item.id)?;
    Ok(FeatureRecord::new(item.id, item.name, item.artist, values))
}

/// Year component of a release date
pub fn parse_release_year(release_date: &str) -> Option<i32> {
    let release_date = release_date.trim();
    if let Ok(date) = NaiveDate::parse_from_str(release_date, "%Y-%m-%d") {
        return Some(date.year());
    }
    release_date.split('-').next()?.parse().ok()
}

#[derive(Debug, Deserialize)]
struct LibraryFile {
    tracks: Vec<TrackItem>,
    #[serde(default)]
    audio_features: Vec<AudioFeatures>,
}

/// A library export stored as JSON:
/// `{ "tracks": [...], "audio_features": [...] }`
#[derive(Debug, Clone, Default)]
pub struct JsonLibrary {
    tracks: Vec<TrackItem>,
    features: HashMap<String, AudioFeatures>,
}

impl JsonLibrary {
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library file: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse library file: {:?}", path))
    }

    pub fn from_json(content: &str) -> crate::Result<Self> {
        let file: LibraryFile = serde_json::from_str(content)?;
        Ok(Self::new(file.tracks, file.audio_features))
    }

    pub fn new(tracks: Vec<TrackItem>, audio_features: Vec<AudioFeatures>) -> Self {
        let features = audio_features
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect();
        Self { tracks, features }
    }
}

impl TrackSource for JsonLibrary {
    fn tracks(&self) -> crate::Result<Vec<TrackItem>> {
        Ok(self.tracks.clone())
    }

    fn audio_features(&self, ids: &[String]) -> crate::Result<Vec<Option<AudioFeatures>>> {
        if ids.len() > AUDIO_FEATURES_BATCH_LIMIT {
            anyhow::bail!(
                "At most {} ids per audio features request, got {}",
                AUDIO_FEATURES_BATCH_LIMIT,
                ids.len()
            );
        }
        Ok(ids.iter().map(|id| self.features.get(id).cloned()).collect())
    }
}
