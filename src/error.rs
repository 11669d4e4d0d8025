//! Failure conditions detected by the clustering core

use crate::schema::Attribute;
use thiserror::Error;

/// Input that cannot be clustered meaningfully
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateInput {
    #[error("no records to cluster")]
    NoRecords,

    #[error("{records} records are not enough for {k} clusters")]
    TooFewRecords { records: usize, k: usize },

    #[error("attribute `{attribute}` has the same value for every record")]
    ZeroVariance { attribute: Attribute },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    #[error("track {track_id}: attribute `{attribute}` {reason}")]
    SchemaViolation {
        track_id: String,
        attribute: Attribute,
        reason: &'static str,
    },

    #[error("degenerate input: {0}")]
    DegenerateInput(#[from] DegenerateInput),

    #[error("cluster {cluster} lost all its members in pass {pass}")]
    EmptyCluster { cluster: usize, pass: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
