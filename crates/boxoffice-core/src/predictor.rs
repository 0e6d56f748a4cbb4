//! Revenue prediction request handling
//!
//! [`RevenuePredictor`] is built once at startup and shared read-only by
//! every request. Checks run in a fixed order: model availability first,
//! then input completeness, then encoding and inference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::{BoxofficeConfig, CompletenessPolicy};
use crate::encoder::{FeatureEncoder, MovieFeatures, UnmatchedSelection};
use crate::error::InferenceError;
use crate::format::format_revenue;
use crate::model::ModelState;

pub const MODEL_UNAVAILABLE_MESSAGE: &str =
    "Error: Model is not loaded. Please check the application logs.";

pub const INCOMPLETE_INPUT_MESSAGE: &str = "Error: Please fill in all fields before submitting.";

/// Raw form input; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRequest {
    pub budget: Option<f64>,
    pub popularity: Option<f64>,
    pub runtime: Option<f64>,
    pub release_year: Option<f64>,
    pub genre: Option<String>,
    pub actor: Option<String>,
    pub director: Option<String>,
}

/// Why a request produced no prediction
///
/// `Display` renders the exact text shown to the user.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("{}", MODEL_UNAVAILABLE_MESSAGE)]
    ModelUnavailable,

    #[error("{}", INCOMPLETE_INPUT_MESSAGE)]
    IncompleteInput { missing: Vec<&'static str> },

    #[error("Error: Prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

/// A successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub value: f64,
    pub display: String,
    /// Selections that matched no indicator column and were encoded as all-zero
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<UnmatchedSelection>,
}

/// Immutable prediction service
#[derive(Debug, Clone)]
pub struct RevenuePredictor {
    encoder: FeatureEncoder,
    model: ModelState,
    policy: CompletenessPolicy,
}

impl RevenuePredictor {
    pub fn new(encoder: FeatureEncoder, model: ModelState, policy: CompletenessPolicy) -> Self {
        Self {
            encoder,
            model,
            policy,
        }
    }

    /// Build with the default catalog, loading the artifact named in `config`
    pub fn from_config(config: &BoxofficeConfig) -> Self {
        let encoder = FeatureEncoder::new(Catalog::default());
        let model = ModelState::load(&config.model.path, encoder.column_names());
        Self::new(encoder, model, config.validation.completeness)
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn catalog(&self) -> &Catalog {
        self.encoder.catalog()
    }

    pub fn model(&self) -> &ModelState {
        &self.model
    }

    pub fn policy(&self) -> CompletenessPolicy {
        self.policy
    }

    /// Validate, encode, and predict
    pub fn evaluate(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let predictor = self.model.predictor().ok_or(PredictError::ModelUnavailable)?;

        let features = self.complete(request)?;
        let vector = self.encoder.encode(&features);

        let value = predictor.predict(&vector).map_err(|e| {
            tracing::error!(model = predictor.name(), "Prediction failed: {}", e);
            PredictError::from(e)
        })?;
        tracing::debug!(value, "Predicted revenue");

        Ok(Prediction {
            value,
            display: format_revenue(value),
            unmatched: vector.unmatched().to_vec(),
        })
    }

    /// The user-visible result or error line
    pub fn handle(&self, request: &PredictionRequest) -> String {
        match self.evaluate(request) {
            Ok(prediction) => prediction.display,
            Err(e) => e.to_string(),
        }
    }

    fn complete(&self, request: &PredictionRequest) -> Result<MovieFeatures, PredictError> {
        let mut missing = Vec::new();

        let mut number = |name: &'static str, value: Option<f64>| -> f64 {
            match value {
                Some(v) if self.accepts_number(v) => v,
                _ => {
                    missing.push(name);
                    0.0
                }
            }
        };
        let budget = number("budget", request.budget);
        let popularity = number("popularity", request.popularity);
        let runtime = number("runtime", request.runtime);
        let release_year = number("release_year", request.release_year);

        let mut text = |name: &'static str, value: &Option<String>| -> String {
            // Whitespace-only counts as missing; the raw value is what gets encoded
            match value.as_deref() {
                Some(v) if !v.trim().is_empty() => v.to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };
        let genre = text("genre", &request.genre);
        let actor = text("actor", &request.actor);
        let director = text("director", &request.director);

        if !missing.is_empty() {
            tracing::debug!(?missing, "Incomplete prediction request");
            return Err(PredictError::IncompleteInput { missing });
        }

        Ok(MovieFeatures {
            budget,
            popularity,
            runtime,
            release_year,
            genre,
            actor,
            director,
        })
    }

    fn accepts_number(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.policy {
            CompletenessPolicy::Truthy => value != 0.0,
            CompletenessPolicy::Presence => true,
        }
    }
}

/// Parse a form field: blank is `None`, unparsable is `None`
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
