//! Picks one representative track per cluster

use crate::cluster::Clustering;
use crate::schema::AttributeSchema;
use std::collections::HashSet;
use tracing::warn;

/// The track chosen for a cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representative {
    /// Index of the cluster it was picked from
    pub cluster: usize,
    pub id: String,
    pub title: String,
    pub artist: String,
    /// False when every member's artist was already taken and the most
    /// central member was picked anyway
    pub distinct_artist: bool,
}

/// Pick the most central member of each cluster whose artist has not been
/// picked yet, falling back to the most central member overall.
///
/// Clusters are visited in order and their members are left sorted by
/// proximity to the centroid. Empty clusters contribute nothing.
pub fn select_representatives(
    clustering: &mut Clustering,
    schema: &AttributeSchema,
) -> Vec<Representative> {
    let mut used_artists: HashSet<String> = HashSet::new();
    let mut picks = Vec::with_capacity(clustering.len());

    for (index, cluster) in clustering.clusters_mut().iter_mut().enumerate() {
        cluster.order_by_proximity(schema);

        let members = cluster.members();
        let Some(most_central) = members.first() else {
            warn!("Cluster {} has no members, no representative picked", index);
            continue;
        };

        let (track, distinct_artist) = match members
            .iter()
            .find(|record| !used_artists.contains(&record.artist))
        {
            Some(record) => (record, true),
            None => {
                warn!(
                    "Cluster {}: every artist already picked, falling back to {}",
                    index, most_central.id
                );
                (most_central, false)
            }
        };

        used_artists.insert(track.artist.clone());
        picks.push(Representative {
            cluster: index,
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            distinct_artist,
        });
    }

    picks
}
