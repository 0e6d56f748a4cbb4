//! Model loading and the predictor seam
//!
//! The artifact is read once at startup. A missing or broken artifact does
//! not stop the process: it produces [`ModelState::Unavailable`] with the
//! reason, and every prediction request is answered with the
//! model-unavailable message instead.

pub mod artifact;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub use artifact::{Aggregation, LinearModel, ModelArtifact, ModelKind, Node, Tree, TreeEnsemble};

use crate::encoder::FeatureVector;
use crate::error::{InferenceError, ModelLoadError};

/// A trained regressor producing one scalar per feature vector
pub trait Predictor: Send + Sync {
    /// Short identifier for logs and status output
    fn name(&self) -> &str {
        "predictor"
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;
}

/// Outcome of the startup load
#[derive(Clone)]
pub enum ModelState {
    Loaded(Arc<dyn Predictor>),
    Unavailable { reason: String },
}

impl ModelState {
    /// Read and validate the artifact at `path` against `columns`
    ///
    /// Never fails; problems are logged and captured as `Unavailable`.
    pub fn load(path: impl AsRef<Path>, columns: &[String]) -> Self {
        let path = path.as_ref();
        match load_artifact(path, columns) {
            Ok(artifact) => {
                tracing::info!(
                    path = %path.display(),
                    model = artifact.name(),
                    "Loaded model artifact"
                );
                Self::Loaded(Arc::new(artifact))
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "Failed to load model: {}", e);
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn loaded(predictor: impl Predictor + 'static) -> Self {
        Self::Loaded(Arc::new(predictor))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn predictor(&self) -> Option<&Arc<dyn Predictor>> {
        match self {
            Self::Loaded(p) => Some(p),
            Self::Unavailable { .. } => None,
        }
    }

    /// Why the model is unavailable, if it is
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Loaded(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(p) => f.debug_tuple("Loaded").field(&p.name()).finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Read, parse, and validate an artifact file
pub fn load_artifact(path: &Path, columns: &[String]) -> Result<ModelArtifact, ModelLoadError> {
    let json = std::fs::read_to_string(path).map_err(|e| ModelLoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let artifact = ModelArtifact::from_json(&json)?;
    artifact.validate(columns)?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Predictor for Constant {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, InferenceError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let state = ModelState::load(dir.path().join("missing.json"), &[]);
        assert!(!state.is_loaded());
        assert!(state.reason().unwrap().contains("IO error"));
    }

    #[test]
    fn test_garbage_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"\x80\x04\x95 not json").unwrap();
        let state = ModelState::load(&path, &[]);
        assert!(state.predictor().is_none());
    }

    #[test]
    fn test_constructed_state() {
        let state = ModelState::loaded(Constant(1.0));
        assert!(state.is_loaded());
        assert_eq!(state.reason(), None);
        assert_eq!(format!("{:?}", state), "Loaded(\"predictor\")");

        let state = ModelState::unavailable("nope");
        assert_eq!(state.reason(), Some("nope"));
    }
}
