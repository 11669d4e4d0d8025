//! Console rendering of clusterings and picks

use crate::cluster::Clustering;
use crate::normalize::AttributeStats;
use crate::schema::AttributeSchema;
use crate::select::Representative;
use std::fmt::Write;

/// Every cluster with its members as `artist: title`
pub fn render_clustering(clustering: &Clustering) -> String {
    let mut out = String::from("YOUR CLUSTERS:\n\n");
    for (index, cluster) in clustering.clusters().iter().enumerate() {
        let _ = writeln!(out, "CLUSTER {}", index);
        for track in cluster.members() {
            let _ = writeln!(out, "{}: {}", track.artist, track.title);
        }
        out.push('\n');
    }
    out
}

/// Cluster sizes, cost and the normalization statistics
pub fn render_statistics(
    clustering: &Clustering,
    schema: &AttributeSchema,
    stats: &[AttributeStats],
) -> String {
    let total = clustering.total_members().max(1);
    let mut out = String::from("=== Cluster Statistics ===\n");
    let _ = writeln!(out, "Number of clusters: {}", clustering.len());
    let _ = writeln!(out, "Total tracks: {}", clustering.total_members());
    let _ = writeln!(out, "Clustering cost: {:.2}", clustering.cost(schema));

    let _ = writeln!(out, "\nCluster sizes:");
    for (i, size) in clustering.cluster_sizes().into_iter().enumerate() {
        let percentage = (size as f64 / total as f64) * 100.0;
        let _ = writeln!(out, "  Cluster {}: {} tracks ({:.1}%)", i, size, percentage);
    }

    let _ = writeln!(out, "\nAttribute scaling:");
    let _ = writeln!(out, "  {:<16} | {:>10} | {:>10}", "Attribute", "Mean", "Std dev");
    for stat in stats {
        let _ = writeln!(
            out,
            "  {:<16} | {:>10.3} | {:>10.3}",
            stat.attribute.name(),
            stat.mean,
            stat.std_dev
        );
    }
    out
}

/// Numbered list of the picked tracks
pub fn render_picks(picks: &[Representative]) -> String {
    let mut out = String::new();
    for (i, pick) in picks.iter().enumerate() {
        let marker = if pick.distinct_artist { "" } else { " (repeated artist)" };
        let _ = writeln!(
            out,
            "{}. {} - {} [cluster {}]{}",
            i + 1,
            pick.artist,
            pick.title,
            pick.cluster,
            marker
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ClusteringEngine, EngineConfig};
    use crate::record::tests::complete_builder;
    use crate::record::FeatureRecord;
    use crate::schema::Attribute;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clustering() -> Clustering {
        let records = (0..4)
            .map(|i| {
                let values = complete_builder(0.0)
                    .numeric(Attribute::Energy, i as f64 * 10.0)
                    .build("r")
                    .unwrap();
                FeatureRecord::new(format!("t{}", i), format!("Title {}", i), format!("Band {}", i), values)
            })
            .collect();
        let config = EngineConfig {
            k: 2,
            passes: 3,
            ..EngineConfig::default()
        };
        ClusteringEngine::new(config, AttributeSchema::default(), StdRng::seed_from_u64(2))
            .unwrap()
            .fit(records)
            .unwrap()
    }

    #[test]
    fn test_render_clustering_lists_every_track() {
        let text = render_clustering(&clustering());
        assert!(text.starts_with("YOUR CLUSTERS:"));
        assert!(text.contains("CLUSTER 0"));
        assert!(text.contains("CLUSTER 1"));
        for i in 0..4 {
            assert!(text.contains(&format!("Band {}: Title {}", i, i)));
        }
    }

    #[test]
    fn test_render_statistics() {
        let stats = vec![AttributeStats {
            attribute: Attribute::Tempo,
            mean: 120.0,
            std_dev: 15.5,
        }];
        let text = render_statistics(&clustering(), &AttributeSchema::default(), &stats);
        assert!(text.contains("Number of clusters: 2"));
        assert!(text.contains("Total tracks: 4"));
        assert!(text.contains("tempo"));
        assert!(text.contains("120.000"));
    }

    #[test]
    fn test_render_picks_marks_repeats() {
        let picks = vec![
            Representative {
                cluster: 0,
                id: "a".to_string(),
                title: "One".to_string(),
                artist: "X".to_string(),
                distinct_artist: true,
            },
            Representative {
                cluster: 1,
                id: "b".to_string(),
                title: "Two".to_string(),
                artist: "X".to_string(),
                distinct_artist: false,
            },
        ];
        let text = render_picks(&picks);
        assert_eq!(text, "1. X - One [cluster 0]\n2. X - Two [cluster 1] (repeated artist)\n");
    }
}
