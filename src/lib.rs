//! PlaylistForge: pick a small, diverse set of representative tracks
//!
//! Tracks are described by a fixed set of numerical and categorical audio
//! attributes, clustered with a k-prototypes variant, and one track per
//! cluster is picked, preferring artists not picked yet.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod metric;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod schema;
pub mod select;
pub mod sink;
pub mod source;

// Re-export public items for easier access
pub use cli::Args;
pub use cluster::{Cluster, Clustering};
pub use config::{FileConfig, Settings};
pub use engine::{ClusteringEngine, EmptyClusterPolicy, EngineConfig};
pub use error::{ClusterError, DegenerateInput};
pub use metric::dissimilarity;
pub use normalize::{normalize, AttributeStats, ZeroVariancePolicy};
pub use pipeline::{pick_tracks, Outcome};
pub use record::{AttributeValues, FeatureRecord, Value};
pub use schema::{Attribute, AttributeKind, AttributeSchema, AttributeSpec};
pub use select::{select_representatives, Representative};
pub use sink::{JsonPlaylistWriter, NewPlaylist, PlaylistSink};
pub use source::{load_records, JsonLibrary, TrackSource};

/// Common result type used by the I/O layers
pub type Result<T> = anyhow::Result<T>;
