//! End-to-end prediction tests against artifacts on disk

use std::path::Path;

use boxoffice_core::model::{LinearModel, ModelKind};
use boxoffice_core::{
    BoxofficeConfig, CompletenessPolicy, FeatureEncoder, ModelArtifact, PredictionRequest,
    RevenuePredictor, MODEL_UNAVAILABLE_MESSAGE,
};

fn write_artifact(path: &Path, artifact: &ModelArtifact) {
    std::fs::write(path, artifact.to_json().unwrap()).unwrap();
}

/// Budget pass-through plus a fixed bonus per indicator column
fn linear_artifact(with_names: bool) -> ModelArtifact {
    let encoder = FeatureEncoder::default();
    let coefficients: Vec<f64> = encoder
        .column_names()
        .iter()
        .map(|name| match name.as_str() {
            "budget" => 2.0,
            "popularity" | "runtime" | "release_year" => 0.0,
            "genre_Animation" => 50_000_000.0,
            "actor_Tom Hanks" => 25_000_000.0,
            _ => 1_000.0,
        })
        .collect();

    ModelArtifact {
        name: Some("linear-test".to_string()),
        feature_names: with_names.then(|| encoder.column_names().to_vec()),
        model: ModelKind::Linear(LinearModel {
            intercept: 0.4,
            coefficients,
        }),
    }
}

fn request() -> PredictionRequest {
    PredictionRequest {
        budget: Some(100_000_000.0),
        popularity: Some(150.0),
        runtime: Some(120.0),
        release_year: Some(2015.0),
        genre: Some("Animation".to_string()),
        actor: Some("Tom Hanks".to_string()),
        director: Some("Steven Spielberg".to_string()),
    }
}

fn config_for(path: &Path) -> BoxofficeConfig {
    let mut config = BoxofficeConfig::default();
    config.model.path = path.to_path_buf();
    config
}

// === Loading ===

#[test]
fn test_loads_linear_artifact_and_predicts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie_revenue_predictor.json");
    write_artifact(&path, &linear_artifact(true));

    let service = RevenuePredictor::from_config(&config_for(&path));
    assert!(service.model().is_loaded());

    // 2 * 100M + 50M + 25M + 1k (director) + 0.4
    assert_eq!(
        service.handle(&request()),
        "Predicted Worldwide Revenue: $275,001,000"
    );
}

#[test]
fn test_artifact_without_names_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    write_artifact(&path, &linear_artifact(false));

    let service = RevenuePredictor::from_config(&config_for(&path));
    assert!(service.model().is_loaded());
}

#[test]
fn test_missing_artifact_serves_unavailable_message() {
    let dir = tempfile::tempdir().unwrap();
    let service = RevenuePredictor::from_config(&config_for(&dir.path().join("nope.json")));

    assert!(!service.model().is_loaded());
    assert_eq!(service.handle(&request()), MODEL_UNAVAILABLE_MESSAGE);
}

#[test]
fn test_reordered_columns_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut artifact = linear_artifact(true);
    if let Some(names) = artifact.feature_names.as_mut() {
        names.swap(4, 5);
    }
    write_artifact(&path, &artifact);

    let service = RevenuePredictor::from_config(&config_for(&path));
    let reason = service.model().reason().unwrap();
    assert!(reason.contains("column 4"), "{}", reason);
}

// === Tree ensembles ===

#[test]
fn test_tree_ensemble_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forest.json");
    // Feature 0 is budget, feature 4 is genre_Action
    std::fs::write(
        &path,
        r#"{
            "name": "forest",
            "model": {
                "type": "tree_ensemble",
                "aggregation": "mean",
                "trees": [
                    { "nodes": [
                        { "feature": 0, "threshold": 50000000.0, "left": 1, "right": 2 },
                        { "leaf": 10000000.0 },
                        { "leaf": 300000000.0 }
                    ] },
                    { "nodes": [
                        { "feature": 4, "threshold": 0.5, "left": 1, "right": 2 },
                        { "leaf": 100000000.0 },
                        { "leaf": 200000000.0 }
                    ] }
                ]
            }
        }"#,
    )
    .unwrap();

    let service = RevenuePredictor::from_config(&config_for(&path));
    assert!(service.model().is_loaded());

    let mut req = request();
    req.genre = Some("Action".to_string());
    assert_eq!(
        service.handle(&req),
        "Predicted Worldwide Revenue: $250,000,000"
    );

    req.budget = Some(1_000_000.0);
    req.genre = Some("Drama".to_string());
    assert_eq!(
        service.handle(&req),
        "Predicted Worldwide Revenue: $55,000,000"
    );
}

// === Completeness policy ===

#[test]
fn test_policy_comes_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    write_artifact(&path, &linear_artifact(true));

    let mut config = config_for(&path);
    config.validation.completeness = CompletenessPolicy::Presence;
    let service = RevenuePredictor::from_config(&config);

    let mut req = request();
    req.popularity = Some(0.0);
    assert!(service.evaluate(&req).is_ok());
}
