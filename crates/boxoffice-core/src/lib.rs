//! Boxoffice Core - movie revenue prediction
//!
//! This crate provides everything behind the prediction form:
//!
//! - **Catalog**: closed enumerations of genres, lead actors and directors
//! - **Encoder**: one-hot feature vectors in the model's training column order
//! - **Model**: JSON model artifacts (linear or tree ensemble) and the
//!   [`Predictor`] trait, loaded once into a [`ModelState`]
//! - **Predictor**: the request handler, validating input and formatting the
//!   result line
//! - **Config**: server address, artifact path, completeness policy
//!
//! # Data flow
//!
//! ```text
//! PredictionRequest → MovieFeatures → FeatureVector → Predictor → "Predicted Worldwide Revenue: $…"
//! ```

pub mod catalog;
pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod model;
pub mod predictor;

pub use catalog::{Catalog, CategoryGroup, Enumeration, ACTORS, BASE_COLUMNS, DIRECTORS, GENRES};
pub use config::{BoxofficeConfig, CompletenessPolicy, ModelConfig, ServerConfig, ValidationConfig};
pub use encoder::{FeatureEncoder, FeatureVector, MovieFeatures, UnmatchedSelection};
pub use error::{BoxofficeError, ConfigError, InferenceError, ModelLoadError, Result};
pub use format::{format_revenue, format_thousands};
pub use model::{ModelArtifact, ModelState, Predictor};
pub use predictor::{
    parse_number, PredictError, Prediction, PredictionRequest, RevenuePredictor,
    INCOMPLETE_INPUT_MESSAGE, MODEL_UNAVAILABLE_MESSAGE,
};

/// Returns the version of boxoffice-core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
