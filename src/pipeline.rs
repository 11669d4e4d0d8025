//! Normalize, cluster and pick, in that order

use crate::cluster::Clustering;
use crate::engine::{ClusteringEngine, EngineConfig};
use crate::error::ClusterError;
use crate::normalize::{normalize, AttributeStats, ZeroVariancePolicy};
use crate::record::FeatureRecord;
use crate::schema::AttributeSchema;
use crate::select::{select_representatives, Representative};
use rand::Rng;
use tracing::info;

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct Outcome {
    pub picks: Vec<Representative>,
    /// Final clustering, members ordered by proximity to their centroid
    pub clustering: Clustering,
    pub stats: Vec<AttributeStats>,
}

impl Outcome {
    pub fn track_ids(&self) -> Vec<String> {
        self.picks.iter().map(|pick| pick.id.clone()).collect()
    }
}

pub fn pick_tracks<R: Rng>(
    mut records: Vec<FeatureRecord>,
    config: EngineConfig,
    schema: AttributeSchema,
    zero_variance: ZeroVariancePolicy,
    rng: R,
) -> Result<Outcome, ClusterError> {
    let stats = normalize(&mut records, &schema, zero_variance)?;

    let mut engine = ClusteringEngine::new(config, schema, rng)?;
    let mut clustering = engine.fit(records)?;

    let picks = select_representatives(&mut clustering, engine.schema());
    info!("Picked {} of {} clusters", picks.len(), clustering.len());

    Ok(Outcome {
        picks,
        clustering,
        stats,
    })
}
