//! Attribute schema: which features exist, their kind and their weight

use crate::error::ClusterError;
use std::fmt;

/// Whether an attribute is compared by squared difference or by equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Numerical,
    Categorical,
}

/// The closed set of attributes every track is described by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Explicit,
    Year,
    TimeSignature,
    Acousticness,
    Speechiness,
    Danceability,
    Tempo,
    Instrumentalness,
    Energy,
    Valence,
}

impl Attribute {
    pub const COUNT: usize = 10;

    /// All attributes in schema order
    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::Explicit,
        Attribute::Year,
        Attribute::TimeSignature,
        Attribute::Acousticness,
        Attribute::Speechiness,
        Attribute::Danceability,
        Attribute::Tempo,
        Attribute::Instrumentalness,
        Attribute::Energy,
        Attribute::Valence,
    ];

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::Explicit | Attribute::TimeSignature => AttributeKind::Categorical,
            _ => AttributeKind::Numerical,
        }
    }

    pub fn is_numerical(self) -> bool {
        self.kind() == AttributeKind::Numerical
    }

    /// Position of the attribute in schema order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Explicit => "explicit",
            Attribute::Year => "year",
            Attribute::TimeSignature => "time_signature",
            Attribute::Acousticness => "acousticness",
            Attribute::Speechiness => "speechiness",
            Attribute::Danceability => "danceability",
            Attribute::Tempo => "tempo",
            Attribute::Instrumentalness => "instrumentalness",
            Attribute::Energy => "energy",
            Attribute::Valence => "valence",
        }
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup result for a single attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSpec {
    pub numerical: bool,
    pub weight: f64,
}

/// Per-attribute weights; higher weight means the attribute matters more
/// when deciding which tracks belong together.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    weights: [f64; Attribute::COUNT],
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self {
            weights: [
                0.5, // explicit
                3.0, // year
                1.0, // time_signature
                1.0, // acousticness
                1.2, // speechiness
                1.2, // danceability
                1.4, // tempo
                1.7, // instrumentalness
                1.7, // energy
                2.0, // valence
            ],
        }
    }
}

impl AttributeSchema {
    /// Schema where every attribute weighs 1.0
    pub fn uniform() -> Self {
        Self {
            weights: [1.0; Attribute::COUNT],
        }
    }

    /// Replace the weight of one attribute
    pub fn with_weight(mut self, attribute: Attribute, weight: f64) -> Result<Self, ClusterError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ClusterError::InvalidConfig(format!(
                "weight for `{}` must be a non-negative number, got {}",
                attribute, weight
            )));
        }
        self.weights[attribute.index()] = weight;
        Ok(self)
    }

    pub fn weight(&self, attribute: Attribute) -> f64 {
        self.weights[attribute.index()]
    }

    pub fn spec(&self, attribute: Attribute) -> AttributeSpec {
        AttributeSpec {
            numerical: attribute.is_numerical(),
            weight: self.weight(attribute),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, AttributeSpec)> + '_ {
        Attribute::ALL.iter().map(move |&attr| (attr, self.spec(attr)))
    }

    pub fn numerical(&self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.into_iter().filter(|attr| attr.is_numerical())
    }
}
