//! HTTP surface: `GET /` liveness and `POST /predict`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Instant};
use thiserror::Error;

use crate::payload;
use crate::predict::Predictor;
use crate::types::{Mode, PredictResponse};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .with_state(state)
}

/// Invalid mode is the caller's fault; everything else surfaces as an
/// internal failure with the underlying message as the sole diagnostic.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid mode. Must be 'pickup' or 'delivery'")]
    InvalidMode,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidMode => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "ETA Prediction API is running.",
        "usage": "Send a POST request to /predict with JSON data (mode + features).",
    }))
}

async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let started = Instant::now();

    let mode = match body.get("mode") {
        None => Mode::Pickup,
        Some(Value::String(s)) => Mode::parse(s).ok_or(ApiError::InvalidMode)?,
        Some(_) => return Err(ApiError::InvalidMode),
    };

    // Accept both {mode, features: {...}} and a flat body of features.
    let object = match body.get("features") {
        Some(Value::Object(features)) => features,
        Some(_) => return Err(anyhow::anyhow!("'features' must be a JSON object").into()),
        None => body
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("request body must be a JSON object"))?,
    };

    let features = payload::payload_from_json(object);
    let prediction = state.predictor.predict(features, mode).map_err(|e| {
        tracing::error!("prediction failed: {e:#}");
        ApiError::Internal(e)
    })?;

    let response = PredictResponse {
        mode,
        eta_normalized: round_to(prediction.eta_normalized, 4),
        eta_minutes: round_to(prediction.eta_minutes, 2),
        processing_time_sec: round_to(started.elapsed().as_secs_f64(), 3),
    };
    tracing::info!(
        "mode={} eta_minutes={} eta_normalized={} processing_time_sec={}",
        mode,
        response.eta_minutes,
        response.eta_normalized,
        response.processing_time_sec
    );
    Ok(Json(response))
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
