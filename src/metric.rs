//! Mixed numerical/categorical dissimilarity

use crate::record::{AttributeValues, Value};
use crate::schema::AttributeSchema;

/// Weighted distance between a record and a centroid (or any two value sets).
///
/// Numerical attributes add `weight * (a - b)^2`, categorical attributes add
/// `weight` when the labels differ. The square root is taken over the whole
/// sum, so the categorical term enters unsquared.
pub fn dissimilarity(a: &AttributeValues, b: &AttributeValues, schema: &AttributeSchema) -> f64 {
    schema
        .iter()
        .map(|(attribute, spec)| {
            let term = match (a.get(attribute), b.get(attribute)) {
                (Value::Numeric(x), Value::Numeric(y)) => (x - y).powi(2),
                (Value::Category(x), Value::Category(y)) => mismatch(x != y),
                // Kinds are checked when values are built
                _ => 1.0,
            };
            spec.weight * term
        })
        .sum::<f64>()
        .sqrt()
}

fn mismatch(differs: bool) -> f64 {
    if differs {
        1.0
    } else {
        0.0
    }
}
