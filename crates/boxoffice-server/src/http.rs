//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form, Json,
};
use serde::Serialize;

use boxoffice_core::{CategoryGroup, PredictError, PredictionRequest};

use crate::page::{render_page, FormValues};
use crate::AppState;

/// Render the empty form
pub async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    let catalog = state.predictor.catalog();
    Html(render_page(catalog, &FormValues::initial(catalog), None))
}

/// Run a form submission and re-render with the result line
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Html<String> {
    let result = state.predictor.handle(&values.to_request());
    Html(render_page(state.predictor.catalog(), &values, Some(&result)))
}

/// Predict from a JSON request
///
/// Responds with `{"prediction", "display"}` or `{"error"}`.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictionRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.predictor.evaluate(&request) {
        Ok(prediction) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "prediction": prediction.value,
                "display": prediction.display,
                "unmatched": prediction.unmatched,
            })),
        ),
        Err(e) => {
            let status = match &e {
                PredictError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                PredictError::IncompleteInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let mut body = serde_json::json!({ "error": e.to_string() });
            if let PredictError::IncompleteInput { missing } = &e {
                body["missing"] = serde_json::json!(missing);
            }
            (status, Json(body))
        }
    }
}

/// One dropdown's choices
#[derive(Debug, Serialize)]
pub struct ChoiceList {
    pub group: CategoryGroup,
    pub label: &'static str,
    pub choices: Vec<&'static str>,
    pub default: &'static str,
    pub fallback: Option<&'static str>,
}

/// List the three enumerations in display order
pub async fn list_choices(State(state): State<Arc<AppState>>) -> Json<Vec<ChoiceList>> {
    let lists = state
        .predictor
        .catalog()
        .groups()
        .into_iter()
        .map(|e| ChoiceList {
            group: e.group,
            label: e.group.label(),
            choices: e.sorted(),
            default: e.default,
            fallback: e.fallback,
        })
        .collect();
    Json(lists)
}

/// Response for the status endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub model_loaded: bool,
    pub model_name: Option<String>,
    pub reason: Option<String>,
    pub model_path: String,
    pub completeness: boxoffice_core::CompletenessPolicy,
    pub feature_count: usize,
    pub version: &'static str,
}

/// Get system status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let model = state.predictor.model();
    Json(StatusResponse {
        model_loaded: model.is_loaded(),
        model_name: model.predictor().map(|p| p.name().to_string()),
        reason: model.reason().map(str::to_string),
        model_path: state.config.model.path.display().to_string(),
        completeness: state.predictor.policy(),
        feature_count: state.predictor.encoder().width(),
        version: boxoffice_core::version(),
    })
}
