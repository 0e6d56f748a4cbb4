//! Error types for boxoffice-core

use thiserror::Error;

/// Result type alias for boxoffice operations
pub type Result<T> = std::result::Result<T, BoxofficeError>;

/// Main error type for boxoffice operations
#[derive(Error, Debug)]
pub enum BoxofficeError {
    /// Model artifact could not be loaded
    #[error("Model load error: {0}")]
    ModelLoad(#[from] ModelLoadError),

    /// Configuration is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while reading and validating a model artifact
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// Artifact file could not be read
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    /// Artifact is not valid JSON for the expected schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Artifact parsed but is structurally unusable
    #[error("Invalid artifact: {0}")]
    Invalid(String),

    /// Artifact was trained on a different column layout
    #[error("Feature layout mismatch at column {index}: expected {expected:?}, artifact has {actual:?}")]
    FeatureMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Artifact declares a different number of columns
    #[error("Feature count mismatch: expected {expected}, artifact has {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

/// Errors raised by a predictor at inference time
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Input vector width does not match the model
    #[error("Input has {actual} features, model expects {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Model produced a value that cannot be reported
    #[error("Model produced a non-finite value")]
    NonFinite,

    /// Tree walk left the node table
    #[error("Tree {tree} references missing node {node}")]
    BrokenTree { tree: usize, node: usize },
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range or malformed
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Config file is not valid TOML/JSON for the schema
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<serde_json::Error> for ModelLoadError {
    fn from(err: serde_json::Error) -> Self {
        ModelLoadError::Parse(err.to_string())
    }
}
