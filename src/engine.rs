//! K-prototypes clustering engine
//!
//! Seeds k clusters with randomly chosen records, then runs a fixed number of
//! passes, each one an assignment phase followed by centroid refitting.

use crate::cluster::{Cluster, Clustering};
use crate::error::{ClusterError, DegenerateInput};
use crate::record::{AttributeValues, FeatureRecord, Value};
use crate::schema::{AttributeKind, AttributeSchema};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const DEFAULT_K: usize = 7;
pub const DEFAULT_PASSES: usize = 100;

/// What refitting does with a cluster that has no members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EmptyClusterPolicy {
    /// Keep the previous centroid so the cluster can win records back later
    #[default]
    #[serde(rename = "retain")]
    RetainCentroid,
    /// Abort with `ClusterError::EmptyCluster`
    #[serde(rename = "fail")]
    Fail,
}

/// Engine parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of clusters
    pub k: usize,
    /// Number of assignment + refitting passes
    pub passes: usize,
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            passes: DEFAULT_PASSES,
            empty_cluster: EmptyClusterPolicy::default(),
        }
    }
}

/// Runs k-prototypes over feature records.
///
/// The random source is injected so runs can be reproduced with a seeded RNG.
pub struct ClusteringEngine<R: Rng> {
    config: EngineConfig,
    schema: AttributeSchema,
    rng: R,
}

impl<R: Rng> ClusteringEngine<R> {
    pub fn new(config: EngineConfig, schema: AttributeSchema, rng: R) -> Result<Self, ClusterError> {
        if config.k == 0 {
            return Err(ClusterError::InvalidConfig(
                "number of clusters must be at least 1".to_string(),
            ));
        }
        Ok(Self { config, schema, rng })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Initialize, then run the configured number of passes
    pub fn fit(&mut self, records: Vec<FeatureRecord>) -> Result<Clustering, ClusterError> {
        let total = records.len();
        let mut clustering = self.initialize(records)?;

        for pass in 1..=self.config.passes {
            let moved = self.assign(&mut clustering);
            self.refit(&mut clustering, pass)?;
            debug!("Pass {}: {} records changed cluster", pass, moved);
        }

        debug_assert_eq!(clustering.total_members(), total);
        info!(
            "Clustered {} records into {} clusters over {} passes (sizes {:?})",
            total,
            clustering.len(),
            self.config.passes,
            clustering.cluster_sizes()
        );
        Ok(clustering)
    }

    /// Seed k clusters with shuffled records, then place every remaining
    /// record into its nearest cluster and refit once.
    pub fn initialize(&mut self, mut records: Vec<FeatureRecord>) -> Result<Clustering, ClusterError> {
        let k = self.config.k;
        if records.is_empty() {
            return Err(DegenerateInput::NoRecords.into());
        }
        if records.len() < k {
            return Err(DegenerateInput::TooFewRecords {
                records: records.len(),
                k,
            }
            .into());
        }

        records.shuffle(&mut self.rng);

        let mut clusters = Vec::with_capacity(k);
        for _ in 0..k {
            let Some(seed) = records.pop() else {
                break;
            };
            let mut cluster = Cluster::new(seed.values.clone());
            cluster.insert(seed);
            clusters.push(cluster);
        }
        let mut clustering = Clustering::new(clusters);

        while let Some(record) = records.pop() {
            self.place(&mut clustering, record);
        }
        self.refit(&mut clustering, 0)?;

        Ok(clustering)
    }

    /// Move every record to the cluster with the nearest centroid.
    ///
    /// Members are snapshotted before any move, so a record is evaluated
    /// exactly once per pass. Returns how many records changed cluster.
    pub fn assign(&self, clustering: &mut Clustering) -> usize {
        let snapshot: Vec<Vec<FeatureRecord>> = clustering
            .clusters_mut()
            .iter_mut()
            .map(Cluster::take_members)
            .collect();

        let mut moved = 0;
        for (origin, members) in snapshot.into_iter().enumerate() {
            for record in members {
                if self.place(clustering, record) != origin {
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Recompute every centroid from its members: mean for numerical
    /// attributes, most frequent value for categorical ones.
    pub fn refit(&self, clustering: &mut Clustering, pass: usize) -> Result<(), ClusterError> {
        for (index, cluster) in clustering.clusters_mut().iter_mut().enumerate() {
            if cluster.is_empty() {
                match self.config.empty_cluster {
                    EmptyClusterPolicy::Fail => {
                        return Err(ClusterError::EmptyCluster {
                            cluster: index,
                            pass,
                        });
                    }
                    EmptyClusterPolicy::RetainCentroid => {
                        warn!("Cluster {} is empty after pass {}, keeping its centroid", index, pass);
                        continue;
                    }
                }
            }
            let centroid = prototype(cluster.centroid(), cluster.members(), &self.schema);
            cluster.set_centroid(centroid);
        }
        Ok(())
    }

    fn place(&self, clustering: &mut Clustering, record: FeatureRecord) -> usize {
        // Clusterings always hold k >= 1 clusters here
        let index = clustering.nearest(&record.values, &self.schema).unwrap_or(0);
        clustering.clusters_mut()[index].insert(record);
        index
    }
}

/// Centroid of a non-empty member list
fn prototype(
    previous: &AttributeValues,
    members: &[FeatureRecord],
    schema: &AttributeSchema,
) -> AttributeValues {
    let mut centroid = previous.clone();
    for (attribute, _) in schema.iter() {
        let value = match attribute.kind() {
            AttributeKind::Numerical => {
                let total: f64 = members
                    .iter()
                    .filter_map(|record| record.values.numeric(attribute))
                    .sum();
                Value::Numeric(total / members.len() as f64)
            }
            AttributeKind::Categorical => {
                match mode(members.iter().filter_map(|r| r.values.get(attribute).as_category())) {
                    Some(label) => Value::Category(label.to_string()),
                    None => continue,
                }
            }
        };
        centroid.set(attribute, value);
    }
    centroid
}

/// Most frequent label; on equal counts the label seen first wins
fn mode<'a>(labels: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
