//! Rescaling of numerical attributes to zero mean and unit standard deviation

use crate::error::{ClusterError, DegenerateInput};
use crate::record::FeatureRecord;
use crate::schema::{Attribute, AttributeSchema};
use ndarray::Array1;
use serde::Deserialize;
use tracing::{debug, warn};

/// What to do with a numerical attribute that is constant across all records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVariancePolicy {
    /// Subtract the mean only; the attribute becomes 0 everywhere and stops
    /// contributing to dissimilarity.
    #[default]
    Center,
    /// Fail with `DegenerateInput::ZeroVariance`.
    Reject,
}

/// Statistics an attribute was rescaled with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeStats {
    pub attribute: Attribute,
    pub mean: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
}

/// Rescale every numerical attribute of `records` in place to
/// `(value - mean) / std_dev`.
///
/// # Returns
/// * The mean and standard deviation used for each numerical attribute, in
///   schema order
pub fn normalize(
    records: &mut [FeatureRecord],
    schema: &AttributeSchema,
    policy: ZeroVariancePolicy,
) -> Result<Vec<AttributeStats>, ClusterError> {
    if records.is_empty() {
        return Err(DegenerateInput::NoRecords.into());
    }

    let mut stats = Vec::new();
    for attribute in schema.numerical() {
        let column: Array1<f64> = records
            .iter()
            .map(|record| record.values.numeric(attribute).unwrap_or(0.0))
            .collect();

        let mean = column.mean().unwrap_or(0.0);
        let std_dev = column.std(0.0);

        if std_dev == 0.0 {
            match policy {
                ZeroVariancePolicy::Reject => {
                    return Err(DegenerateInput::ZeroVariance { attribute }.into());
                }
                ZeroVariancePolicy::Center => {
                    warn!(
                        "Attribute `{}` is constant ({}) across all records, centering only",
                        attribute, mean
                    );
                }
            }
        }

        let scale = if std_dev == 0.0 { 1.0 } else { std_dev };
        for (record, value) in records.iter_mut().zip(column.iter()) {
            record.values.set_numeric(attribute, (value - mean) / scale);
        }

        debug!("Rescaled `{}`: mean={:.4}, std_dev={:.4}", attribute, mean, std_dev);
        stats.push(AttributeStats {
            attribute,
            mean,
            std_dev,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::complete_builder;

    fn record(id: &str, year: f64, tempo: f64, energy: f64) -> FeatureRecord {
        let values = complete_builder(0.0)
            .numeric(Attribute::Year, year)
            .numeric(Attribute::Tempo, tempo)
            .numeric(Attribute::Energy, energy)
            .numeric(Attribute::Valence, year * 0.001 + tempo)
            .build(id)
            .unwrap();
        FeatureRecord::new(id, id, "artist", values)
    }

    fn varied_records() -> Vec<FeatureRecord> {
        vec![
            record("a", 1975.0, 90.0, 0.2),
            record("b", 1999.0, 120.0, 0.9),
            record("c", 2012.0, 128.0, 0.5),
            record("d", 2020.0, 70.0, 0.7),
            record("e", 1988.0, 140.0, 0.1),
        ]
    }

    fn column(records: &[FeatureRecord], attribute: Attribute) -> Array1<f64> {
        records
            .iter()
            .map(|r| r.values.numeric(attribute).unwrap())
            .collect()
    }

    #[test]
    fn test_normalized_moments() {
        let mut records = varied_records();
        // Constant attributes get centered, the rest rescaled
        normalize(&mut records, &AttributeSchema::default(), ZeroVariancePolicy::Center).unwrap();

        for attribute in [Attribute::Year, Attribute::Tempo, Attribute::Energy, Attribute::Valence] {
            let col = column(&records, attribute);
            assert!(col.mean().unwrap().abs() < 1e-9, "{} mean", attribute);
            assert!((col.std(0.0) - 1.0).abs() < 1e-9, "{} std", attribute);
        }
    }

    #[test]
    fn test_stats_use_population_formula() {
        let mut records = vec![
            record("a", 2000.0, 100.0, 0.0),
            record("b", 2002.0, 100.0, 1.0),
        ];
        let stats =
            normalize(&mut records, &AttributeSchema::default(), ZeroVariancePolicy::Center).unwrap();

        let year = stats.iter().find(|s| s.attribute == Attribute::Year).unwrap();
        assert_eq!(year.mean, 2001.0);
        assert_eq!(year.std_dev, 1.0);
        assert_eq!(records[0].values.numeric(Attribute::Year), Some(-1.0));
        assert_eq!(records[1].values.numeric(Attribute::Year), Some(1.0));
    }

    #[test]
    fn test_zero_variance_center() {
        let mut records = vec![
            record("a", 2000.0, 100.0, 0.0),
            record("b", 2000.0, 110.0, 1.0),
        ];
        normalize(&mut records, &AttributeSchema::default(), ZeroVariancePolicy::Center).unwrap();

        for r in &records {
            assert_eq!(r.values.numeric(Attribute::Year), Some(0.0));
            assert!(r.values.numeric(Attribute::Year).unwrap().is_finite());
        }
    }

    #[test]
    fn test_zero_variance_reject() {
        let mut records = vec![
            record("a", 2000.0, 100.0, 0.0),
            record("b", 2000.0, 110.0, 1.0),
        ];
        let err = normalize(&mut records, &AttributeSchema::default(), ZeroVariancePolicy::Reject)
            .unwrap_err();
        assert_eq!(
            err,
            ClusterError::DegenerateInput(DegenerateInput::ZeroVariance {
                attribute: Attribute::Year
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let mut records: Vec<FeatureRecord> = Vec::new();
        let result = normalize(&mut records, &AttributeSchema::default(), ZeroVariancePolicy::Center);
        assert_eq!(
            result,
            Err(ClusterError::DegenerateInput(DegenerateInput::NoRecords))
        );
    }

    #[test]
    fn test_renormalizing_is_noop() {
        let mut records = varied_records();
        let schema = AttributeSchema::default();
        normalize(&mut records, &schema, ZeroVariancePolicy::Center).unwrap();
        let before = column(&records, Attribute::Tempo);

        normalize(&mut records, &schema, ZeroVariancePolicy::Center).unwrap();
        let after = column(&records, Attribute::Tempo);

        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
