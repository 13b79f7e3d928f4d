//! Descriptor-to-feature-row encoding against the model's training schema.
//!
//! The offline training pipeline fit the regressor on nine named columns.
//! The artifact stores that schema plus one vocabulary per free-text column;
//! this module turns a [`DisasterDescriptor`] into the dense row the trees
//! were trained on, or fails the request if a value was never seen during
//! training.

use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::descriptor::DisasterDescriptor;

/// Number of model input features.
pub const NUM_FEATURES: usize = 9;

/// Training-time column names, in training order. The export pipeline writes
/// the same list into the artifact; `PopulationModel::validate` rejects
/// artifacts whose stored schema disagrees.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "Year",
    "Country",
    "Region",
    "Continent",
    "Disaster Group",
    "Disaster Subgroup",
    "Disaster Type",
    "Disaster Subtype",
    "Dis Mag Value",
];

/// A single-row model input.
pub type FeatureRow = [f64; NUM_FEATURES];

// =============================================================================
// Category encoding
// =============================================================================

/// Vocabulary for one categorical column: a value's encoded feature is its
/// index in `values`. Vocabularies are small (hundreds of entries at most),
/// so lookup is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct CategoryEncoder {
    pub values: Vec<String>,
}

impl CategoryEncoder {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Index of `value` in the training vocabulary, if it was seen.
    /// Matching is exact: the training data was not normalized, so neither
    /// is the lookup.
    pub fn encode(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One encoder per free-text column. `Disaster Group` is absent: the closed
/// enum encodes itself (see [`crate::descriptor::DisasterGroup::encoded`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct FeatureEncoders {
    pub country: CategoryEncoder,
    pub region: CategoryEncoder,
    pub continent: CategoryEncoder,
    pub subgroup: CategoryEncoder,
    pub disaster_type: CategoryEncoder,
    pub subtype: CategoryEncoder,
}

impl FeatureEncoders {
    /// Build the model input row for one descriptor, in [`FEATURE_NAMES`]
    /// order. Fails on the first categorical value the training vocabulary
    /// does not contain.
    pub fn encode_row(&self, d: &DisasterDescriptor) -> Result<FeatureRow, PredictError> {
        Ok([
            d.year as f64,
            self.lookup(&self.country, "Country", &d.country)?,
            self.lookup(&self.region, "Region", &d.region)?,
            self.lookup(&self.continent, "Continent", &d.continent)?,
            d.group.encoded(),
            self.lookup(&self.subgroup, "Disaster Subgroup", &d.subgroup)?,
            self.lookup(&self.disaster_type, "Disaster Type", &d.disaster_type)?,
            self.lookup(&self.subtype, "Disaster Subtype", &d.subtype)?,
            d.magnitude,
        ])
    }

    fn lookup(
        &self,
        encoder: &CategoryEncoder,
        field: &'static str,
        value: &str,
    ) -> Result<f64, PredictError> {
        encoder
            .encode(value)
            .map(|idx| idx as f64)
            .ok_or_else(|| PredictError::UnknownCategory {
                field,
                value: value.to_string(),
            })
    }
}

// =============================================================================
// Prediction errors
// =============================================================================

/// Why a single prediction request failed. Fails the one triggered action;
/// the next trigger starts clean.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// A categorical input value is absent from the model's training
    /// vocabulary, so the encoder cannot produce a feature for it.
    UnknownCategory { field: &'static str, value: String },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::UnknownCategory { field, value } => write!(
                f,
                "{field} value \"{value}\" is not in the model's training vocabulary"
            ),
        }
    }
}

impl std::error::Error for PredictError {}
