//! Serialized model artifacts
//!
//! The exporter writes a JSON document:
//!
//! ```json
//! {
//!   "name": "movie_revenue_predictor",
//!   "feature_names": ["budget", "popularity", "runtime", "release_year", "genre_Action"],
//!   "model": { "type": "linear", "intercept": 1.5e6, "coefficients": [2.1, 0.0] }
//! }
//! ```
//!
//! Tree ensembles use `"type": "tree_ensemble"` with a list of trees, each a
//! flat node table where node 0 is the root. Splits send `x <= threshold` to
//! the left child, the same convention scikit-learn exports.

use serde::{Deserialize, Serialize};

use super::Predictor;
use crate::encoder::FeatureVector;
use crate::error::{InferenceError, ModelLoadError};

/// Top-level artifact document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: Option<String>,
    /// Training column layout, when the exporter recorded it
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub model: ModelKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelKind {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

/// `y = intercept + sum(coefficients[i] * x[i])`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

/// How per-tree outputs are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest style
    #[default]
    Mean,
    /// Gradient boosting style
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

impl ModelArtifact {
    /// Parse an artifact from JSON text
    pub fn from_json(json: &str) -> Result<Self, ModelLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the artifact against the encoder's column layout
    pub fn validate(&self, columns: &[String]) -> Result<(), ModelLoadError> {
        if let Some(names) = &self.feature_names {
            if names.len() != columns.len() {
                return Err(ModelLoadError::FeatureCount {
                    expected: columns.len(),
                    actual: names.len(),
                });
            }
            if let Some((index, (expected, actual))) = columns
                .iter()
                .zip(names)
                .enumerate()
                .find(|(_, (e, a))| e != a)
            {
                return Err(ModelLoadError::FeatureMismatch {
                    index,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }

        match &self.model {
            ModelKind::Linear(linear) => linear.validate(columns.len()),
            ModelKind::TreeEnsemble(ensemble) => ensemble.validate(columns.len()),
        }
    }
}

impl LinearModel {
    fn validate(&self, width: usize) -> Result<(), ModelLoadError> {
        if self.coefficients.len() != width {
            return Err(ModelLoadError::FeatureCount {
                expected: width,
                actual: self.coefficients.len(),
            });
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelLoadError::Invalid(
                "linear model has non-finite weights".to_string(),
            ));
        }
        Ok(())
    }

    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

impl TreeEnsemble {
    fn validate(&self, width: usize) -> Result<(), ModelLoadError> {
        if self.trees.is_empty() {
            return Err(ModelLoadError::Invalid("tree ensemble has no trees".to_string()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelLoadError::Invalid(format!("tree {} has no nodes", t)));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    threshold,
                } = node
                {
                    if *feature >= width {
                        return Err(ModelLoadError::Invalid(format!(
                            "tree {} node {} splits on feature {} (width {})",
                            t, i, feature, width
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelLoadError::Invalid(format!(
                            "tree {} node {} has NaN threshold",
                            t, i
                        )));
                    }
                    // Children after parents guarantees the walk terminates
                    for child in [*left, *right] {
                        if child <= i || child >= tree.nodes.len() {
                            return Err(ModelLoadError::Invalid(format!(
                                "tree {} node {} has invalid child {}",
                                t, i, child
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, x: &[f64]) -> Result<f64, InferenceError> {
        let mut total = 0.0;
        for (t, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(x).map_err(|node| InferenceError::BrokenTree { tree: t, node })?;
        }

        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + combined)
    }
}

impl Tree {
    /// Walk from the root; `Err` carries the first missing node index
    fn evaluate(&self, x: &[f64]) -> Result<f64, usize> {
        let mut index = 0;
        loop {
            match self.nodes.get(index).ok_or(index)? {
                Node::Leaf { leaf } => return Ok(*leaf),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = x.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl Predictor for ModelArtifact {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let x = features.as_slice();
        let value = match &self.model {
            ModelKind::Linear(linear) => {
                if x.len() != linear.coefficients.len() {
                    return Err(InferenceError::WidthMismatch {
                        expected: linear.coefficients.len(),
                        actual: x.len(),
                    });
                }
                linear.evaluate(x)
            }
            ModelKind::TreeEnsemble(ensemble) => ensemble.evaluate(x)?,
        };

        if !value.is_finite() {
            return Err(InferenceError::NonFinite);
        }
        Ok(value)
    }
}
