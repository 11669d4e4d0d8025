//! Feature records: one track's identity plus a value for every attribute

use crate::error::ClusterError;
use crate::schema::{Attribute, AttributeKind};

/// A single attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numeric(f64),
    Category(String),
}

impl Value {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Value::Numeric(_) => AttributeKind::Numerical,
            Value::Category(_) => AttributeKind::Categorical,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            Value::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Numeric(_) => None,
            Value::Category(label) => Some(label),
        }
    }
}

/// Values for every attribute of the schema, indexed by [`Attribute`].
///
/// Only obtainable through [`AttributeValuesBuilder::build`], so a value of
/// the right kind is guaranteed to be present for each attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValues {
    values: [Value; Attribute::COUNT],
}

impl AttributeValues {
    pub fn builder() -> AttributeValuesBuilder {
        AttributeValuesBuilder::default()
    }

    pub fn get(&self, attribute: Attribute) -> &Value {
        &self.values[attribute.index()]
    }

    /// Numerical value of `attribute`, `None` for categorical attributes
    pub fn numeric(&self, attribute: Attribute) -> Option<f64> {
        self.get(attribute).as_numeric()
    }

    /// Overwrites a numerical value; categorical slots are left untouched.
    pub(crate) fn set_numeric(&mut self, attribute: Attribute, value: f64) {
        if let Value::Numeric(slot) = &mut self.values[attribute.index()] {
            *slot = value;
        }
    }

    pub(crate) fn set(&mut self, attribute: Attribute, value: Value) {
        if value.kind() == attribute.kind() {
            self.values[attribute.index()] = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &Value)> {
        Attribute::ALL.iter().copied().zip(self.values.iter())
    }
}

/// Collects attribute values one at a time and checks completeness
#[derive(Debug, Clone, Default)]
pub struct AttributeValuesBuilder {
    slots: [Option<Value>; Attribute::COUNT],
}

impl AttributeValuesBuilder {
    pub fn set(mut self, attribute: Attribute, value: Value) -> Self {
        self.slots[attribute.index()] = Some(value);
        self
    }

    pub fn numeric(self, attribute: Attribute, value: f64) -> Self {
        self.set(attribute, Value::Numeric(value))
    }

    pub fn category(self, attribute: Attribute, label: impl Into<String>) -> Self {
        self.set(attribute, Value::Category(label.into()))
    }

    /// Fails with `SchemaViolation` on the first missing or mistyped attribute
    pub fn build(self, track_id: &str) -> Result<AttributeValues, ClusterError> {
        let violation = |attribute: Attribute, reason: &'static str| ClusterError::SchemaViolation {
            track_id: track_id.to_string(),
            attribute,
            reason,
        };

        let mut values = Vec::with_capacity(Attribute::COUNT);
        for (attribute, slot) in Attribute::ALL.into_iter().zip(self.slots) {
            let value = slot.ok_or_else(|| violation(attribute, "is missing"))?;
            if value.kind() != attribute.kind() {
                let reason = match attribute.kind() {
                    AttributeKind::Numerical => "expects a numerical value",
                    AttributeKind::Categorical => "expects a categorical value",
                };
                return Err(violation(attribute, reason));
            }
            if let Value::Numeric(v) = value {
                if !v.is_finite() {
                    return Err(violation(attribute, "is not a finite number"));
                }
            }
            values.push(value);
        }

        let values: [Value; Attribute::COUNT] = values
            .try_into()
            .map_err(|_| violation(Attribute::Explicit, "could not be collected"))?;
        Ok(AttributeValues { values })
    }
}

/// One track as seen by the clustering engine
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub values: AttributeValues,
}

impl FeatureRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        values: AttributeValues,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            values,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builder with every attribute filled, numerical ones set to `base`
    pub(crate) fn complete_builder(base: f64) -> AttributeValuesBuilder {
        Attribute::ALL
            .into_iter()
            .fold(AttributeValues::builder(), |builder, attr| {
                if attr.is_numerical() {
                    builder.numeric(attr, base)
                } else {
                    builder.category(attr, "4")
                }
            })
    }

    #[test]
    fn test_build_complete_values() {
        let values = complete_builder(0.5)
            .category(Attribute::Explicit, "false")
            .build("t1")
            .unwrap();
        assert_eq!(values.numeric(Attribute::Tempo), Some(0.5));
        assert_eq!(values.get(Attribute::Explicit).as_category(), Some("false"));
        assert_eq!(values.numeric(Attribute::Explicit), None);
        assert_eq!(values.iter().count(), Attribute::COUNT);
    }

    #[test]
    fn test_missing_attribute_is_schema_violation() {
        let builder = Attribute::ALL
            .into_iter()
            .filter(|attr| *attr != Attribute::Valence)
            .fold(AttributeValues::builder(), |b, attr| {
                if attr.is_numerical() {
                    b.numeric(attr, 1.0)
                } else {
                    b.category(attr, "x")
                }
            });

        let err = builder.build("t9").unwrap_err();
        assert_eq!(
            err,
            ClusterError::SchemaViolation {
                track_id: "t9".to_string(),
                attribute: Attribute::Valence,
                reason: "is missing",
            }
        );
    }

    #[test]
    fn test_wrong_kind_is_schema_violation() {
        let err = complete_builder(1.0)
            .numeric(Attribute::TimeSignature, 4.0)
            .build("t2")
            .unwrap_err();
        assert!(matches!(
            err,
            ClusterError::SchemaViolation {
                attribute: Attribute::TimeSignature,
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let result = complete_builder(1.0)
            .numeric(Attribute::Energy, f64::NAN)
            .build("t3");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_numeric_ignores_categorical_slot() {
        let mut values = complete_builder(1.0).build("t4").unwrap();
        values.set_numeric(Attribute::Explicit, 3.0);
        values.set_numeric(Attribute::Energy, 3.0);
        assert_eq!(values.get(Attribute::Explicit).as_category(), Some("4"));
        assert_eq!(values.numeric(Attribute::Energy), Some(3.0));
    }
}
