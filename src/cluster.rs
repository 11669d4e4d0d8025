//! Clusters and the clustering they form

use crate::metric::dissimilarity;
use crate::record::{AttributeValues, FeatureRecord};
use crate::schema::AttributeSchema;

/// A centroid plus the records currently assigned to it
#[derive(Debug, Clone)]
pub struct Cluster {
    centroid: AttributeValues,
    members: Vec<FeatureRecord>,
}

impl Cluster {
    pub(crate) fn new(centroid: AttributeValues) -> Self {
        Self {
            centroid,
            members: Vec::new(),
        }
    }

    pub fn centroid(&self) -> &AttributeValues {
        &self.centroid
    }

    pub fn members(&self) -> &[FeatureRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn insert(&mut self, record: FeatureRecord) {
        self.members.push(record);
    }

    pub(crate) fn take_members(&mut self) -> Vec<FeatureRecord> {
        std::mem::take(&mut self.members)
    }

    pub(crate) fn set_centroid(&mut self, centroid: AttributeValues) {
        self.centroid = centroid;
    }

    /// Distance of each member to the centroid, in member order
    pub fn distances(&self, schema: &AttributeSchema) -> Vec<f64> {
        self.members
            .iter()
            .map(|record| dissimilarity(&record.values, &self.centroid, schema))
            .collect()
    }

    /// Sort members from most to least central. The sort is stable, so
    /// equally distant members keep their relative order.
    pub fn order_by_proximity(&mut self, schema: &AttributeSchema) {
        let mut ranked: Vec<(f64, FeatureRecord)> = self
            .take_members()
            .into_iter()
            .map(|record| (dissimilarity(&record.values, &self.centroid, schema), record))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.members = ranked.into_iter().map(|(_, record)| record).collect();
    }
}

/// A fixed-size set of clusters
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    clusters: Vec<Cluster>,
}

impl Clustering {
    pub(crate) fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub(crate) fn clusters_mut(&mut self) -> &mut [Cluster] {
        &mut self.clusters
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Cluster::len).collect()
    }

    pub fn total_members(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// Index of the cluster whose centroid is nearest to `values`.
    /// Exact ties go to the cluster that comes first.
    pub fn nearest(&self, values: &AttributeValues, schema: &AttributeSchema) -> Option<usize> {
        let mut min_distance = f64::INFINITY;
        let mut closest = None;

        for (index, cluster) in self.clusters.iter().enumerate() {
            let distance = dissimilarity(values, &cluster.centroid, schema);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(index);
            }
        }

        closest
    }

    /// Sum of squared member-to-centroid dissimilarities
    pub fn cost(&self, schema: &AttributeSchema) -> f64 {
        self.clusters
            .iter()
            .flat_map(|cluster| cluster.distances(schema))
            .map(|d| d * d)
            .sum()
    }
}
