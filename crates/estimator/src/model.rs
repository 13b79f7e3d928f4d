//! The loaded regression model: a boosted tree ensemble behind a narrow
//! predict seam.
//!
//! Deserialized once at process start from the model artifact (see the
//! artifact crate), then held as read-only process-wide state for the
//! lifetime of the process.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::descriptor::DisasterDescriptor;
use crate::features::{FeatureEncoders, FeatureRow, PredictError, FEATURE_NAMES, NUM_FEATURES};

// =============================================================================
// Predict seam
// =============================================================================

/// Fixed-schema row in, scalar out. The one capability the rest of the
/// system needs from a regressor, so the concrete implementation stays
/// swappable behind this single method.
pub trait TabularRegressor {
    fn predict(&self, row: &FeatureRow) -> f64;
}

// =============================================================================
// Boosted regression trees
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum TreeNode {
    /// Internal split: `row[feature] <= threshold` goes left, else right.
    Split {
        feature: u8,
        threshold: f64,
        left: u16,
        right: u16,
    },
    Leaf { value: f64 },
}

/// One regression tree, stored as a flat node array with the root at
/// index 0. `PopulationModel::validate` guarantees child indices are in
/// range and strictly greater than their parent's, so `output` always
/// terminates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn output(&self, row: &FeatureRow) -> f64 {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature as usize] <= *threshold {
                        *left as usize
                    } else {
                        *right as usize
                    };
                }
            }
        }
    }
}

/// Gradient-boosted ensemble: base score plus the sum of per-tree outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct GradientBoostedTrees {
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl TabularRegressor for GradientBoostedTrees {
    fn predict(&self, row: &FeatureRow) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.output(row)).sum::<f64>()
    }
}

// =============================================================================
// PopulationModel
// =============================================================================

/// Everything the artifact stores: the training schema, the categorical
/// vocabularies, and the regressor itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PopulationModel {
    /// Column names in training order, as written by the export pipeline.
    pub schema: Vec<String>,
    pub encoders: FeatureEncoders,
    pub regressor: GradientBoostedTrees,
}

impl PopulationModel {
    /// Predict the affected-population scalar for one descriptor.
    /// The output is raw regressor output: unrounded and not guaranteed
    /// non-negative (see `estimate_impact` for the display-side policy).
    pub fn predict_population(&self, descriptor: &DisasterDescriptor) -> Result<f64, PredictError> {
        let row = self.encoders.encode_row(descriptor)?;
        Ok(self.regressor.predict(&row))
    }

    /// Structural validation, run once right after artifact decode. A model
    /// that fails here is incompatible with this build and must never serve
    /// predictions.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema.len() != NUM_FEATURES {
            return Err(format!(
                "model schema has {} columns, this build expects {}",
                self.schema.len(),
                NUM_FEATURES
            ));
        }
        for (stored, expected) in self.schema.iter().zip(FEATURE_NAMES.iter()) {
            if stored != expected {
                return Err(format!(
                    "model schema column \"{stored}\" does not match expected \"{expected}\""
                ));
            }
        }

        for (name, encoder) in [
            ("Country", &self.encoders.country),
            ("Region", &self.encoders.region),
            ("Continent", &self.encoders.continent),
            ("Disaster Subgroup", &self.encoders.subgroup),
            ("Disaster Type", &self.encoders.disaster_type),
            ("Disaster Subtype", &self.encoders.subtype),
        ] {
            if encoder.is_empty() {
                return Err(format!("empty training vocabulary for column \"{name}\""));
            }
        }

        if self.regressor.trees.is_empty() {
            return Err("model contains no trees".to_string());
        }
        if !self.regressor.base_score.is_finite() {
            return Err("non-finite base score".to_string());
        }
        for (ti, tree) in self.regressor.trees.iter().enumerate() {
            validate_tree(ti, tree)?;
        }
        Ok(())
    }
}

fn validate_tree(ti: usize, tree: &RegressionTree) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err(format!("tree {ti} has no nodes"));
    }
    for (ni, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Leaf { value } => {
                if !value.is_finite() {
                    return Err(format!("tree {ti} node {ni}: non-finite leaf value"));
                }
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature as usize >= NUM_FEATURES {
                    return Err(format!(
                        "tree {ti} node {ni}: feature index {feature} out of range"
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("tree {ti} node {ni}: non-finite threshold"));
                }
                // Children must point forward in the array: in-range and
                // strictly past the parent, so evaluation cannot loop.
                for child in [*left as usize, *right as usize] {
                    if child >= tree.nodes.len() {
                        return Err(format!(
                            "tree {ti} node {ni}: child index {child} out of range"
                        ));
                    }
                    if child <= ni {
                        return Err(format!(
                            "tree {ti} node {ni}: child index {child} does not point forward"
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

/// The model loaded at process start. Inserted before `App::run` and only
/// ever borrowed immutably afterwards (`Res<LoadedModel>`), so every
/// request handler shares it without locking.
#[derive(Resource)]
pub struct LoadedModel(pub PopulationModel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::CategoryEncoder;

    fn leaf_tree(value: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![TreeNode::Leaf { value }],
        }
    }

    fn stump(feature: u8, threshold: f64, below: f64, above: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: below },
                TreeNode::Leaf { value: above },
            ],
        }
    }

    fn valid_model() -> PopulationModel {
        PopulationModel {
            schema: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            encoders: FeatureEncoders {
                country: CategoryEncoder::new(["India"]),
                region: CategoryEncoder::new(["South Asia"]),
                continent: CategoryEncoder::new(["Asia"]),
                subgroup: CategoryEncoder::new(["Hydrological"]),
                disaster_type: CategoryEncoder::new(["Flood"]),
                subtype: CategoryEncoder::new(["Flash flood"]),
            },
            regressor: GradientBoostedTrees {
                base_score: 1000.0,
                trees: vec![leaf_tree(250.0)],
            },
        }
    }

    #[test]
    fn test_stump_routes_on_threshold() {
        let tree = stump(8, 5.0, 10.0, 90.0);
        let mut row = [0.0; NUM_FEATURES];
        row[8] = 3.0;
        assert_eq!(tree.output(&row), 10.0);
        row[8] = 5.0; // boundary goes left
        assert_eq!(tree.output(&row), 10.0);
        row[8] = 7.5;
        assert_eq!(tree.output(&row), 90.0);
    }

    #[test]
    fn test_ensemble_sums_base_and_trees() {
        let ensemble = GradientBoostedTrees {
            base_score: 100.0,
            trees: vec![leaf_tree(20.0), leaf_tree(-5.0), stump(0, 2000.0, 1.0, 2.0)],
        };
        let mut row = [0.0; NUM_FEATURES];
        row[0] = 2025.0;
        assert_eq!(ensemble.predict(&row), 100.0 + 20.0 - 5.0 + 2.0);
    }

    #[test]
    fn test_validate_accepts_well_formed_model() {
        assert_eq!(valid_model().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_ensemble() {
        let mut model = valid_model();
        model.regressor.trees.clear();
        let err = model.validate().unwrap_err();
        assert!(err.contains("no trees"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_schema_mismatch() {
        let mut model = valid_model();
        model.schema[4] = "Group".to_string();
        let err = model.validate().unwrap_err();
        assert!(err.contains("Group"), "got: {err}");

        model = valid_model();
        model.schema.pop();
        let err = model.validate().unwrap_err();
        assert!(err.contains("8 columns"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_bad_feature_index() {
        let mut model = valid_model();
        model.regressor.trees = vec![stump(NUM_FEATURES as u8, 0.0, 1.0, 2.0)];
        let err = model.validate().unwrap_err();
        assert!(err.contains("feature index"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_backward_child_index() {
        let mut model = valid_model();
        model.regressor.trees = vec![RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0, // points at itself
                    right: 1,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        }];
        let err = model.validate().unwrap_err();
        assert!(err.contains("point forward"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_out_of_range_child() {
        let mut model = valid_model();
        model.regressor.trees = vec![RegressionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 1,
                right: 9,
            }],
        }];
        let err = model.validate().unwrap_err();
        assert!(err.contains("out of range"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_empty_vocabulary() {
        let mut model = valid_model();
        model.encoders.subtype = CategoryEncoder::default();
        let err = model.validate().unwrap_err();
        assert!(err.contains("Disaster Subtype"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let mut model = valid_model();
        model.regressor.trees = vec![leaf_tree(f64::NAN)];
        assert!(model.validate().is_err());

        model = valid_model();
        model.regressor.base_score = f64::INFINITY;
        assert!(model.validate().is_err());

        model = valid_model();
        model.regressor.trees = vec![stump(0, f64::NAN, 1.0, 2.0)];
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_predict_population_through_encoders() {
        let model = valid_model();
        let descriptor = crate::descriptor::DisasterDescriptor {
            year: 2025,
            country: "India".to_string(),
            region: "South Asia".to_string(),
            continent: "Asia".to_string(),
            group: crate::descriptor::DisasterGroup::Natural,
            subgroup: "Hydrological".to_string(),
            disaster_type: "Flood".to_string(),
            subtype: "Flash flood".to_string(),
            magnitude: 7.5,
        };
        assert_eq!(model.predict_population(&descriptor).unwrap(), 1250.0);
    }
}
