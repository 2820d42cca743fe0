//! HTTP endpoints of the spam prediction service.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::dataset::{Corpus, MessageClass};
use crate::model::SpamModel;

/// State shared by every request, built once at startup and never mutated.
pub struct AppContext {
    pub corpus: Corpus,
    pub model: SpamModel,
}

impl AppContext {
    pub fn new(corpus: Corpus, model: SpamModel) -> Self {
        Self { corpus, model }
    }
}

/// Request errors, all reported as `{"msg": ...}` bodies
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing text value")]
    MissingText,

    #[error("invalid JSON body")]
    InvalidBody(#[source] serde_json::Error),

    #[error("unknown message class")]
    UnknownClass(String),

    #[error("no {0} messages available")]
    NoMessages(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingText | ApiError::InvalidBody(_) | ApiError::UnknownClass(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NoMessages(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("rejecting request: {:?}", self);
        let body = MessageResponse {
            msg: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub msg: String,
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub msg: String,
    pub content: PredictContent,
}

#[derive(Debug, Serialize)]
pub struct PredictContent {
    pub prediction: String,
    pub havepred: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub content: ModelInfo,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub hasbeentrained: bool,
    pub numobs: usize,
    pub numtkns: usize,
    pub numspam: usize,
    pub numham: usize,
}

#[derive(Debug, Serialize)]
pub struct RandomMessageResponse {
    pub content: String,
}

/// Builds the service router over the shared context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/predict", post(predict))
        .route("/model", get(model_info))
        .route("/messages/random/:class", get(random_message))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Renders a predicted label as a percentage string, e.g. `"100.0%"`.
pub fn format_prediction(label: usize) -> String {
    format!("{:?}%", label as f64 * 100.0)
}

async fn status(State(ctx): State<Arc<AppContext>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        msg: "spam predictor is up and running".to_string(),
        note: format!("the number of rows in the dataset is: {}", ctx.corpus.len()),
    })
}

/// The body is parsed as JSON whatever its content type.
async fn predict(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let request: PredictRequest = serde_json::from_slice(&body).map_err(ApiError::InvalidBody)?;

    let text = match request.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::MissingText),
    };

    let labels = ctx.model.predict(&[text.as_str()]);
    let prediction = format_prediction(labels[0]);
    debug!("predicted {} for {} chars of text", prediction, text.len());

    Ok(Json(PredictResponse {
        msg: "Naive Bayes spam prediction".to_string(),
        content: PredictContent {
            prediction,
            havepred: true,
        },
    }))
}

async fn model_info(State(ctx): State<Arc<AppContext>>) -> Json<ModelInfoResponse> {
    let summary = ctx.model.summary();
    Json(ModelInfoResponse {
        content: ModelInfo {
            hasbeentrained: true,
            numobs: summary.observations,
            numtkns: ctx.model.vocabulary_len(),
            numspam: summary.spam,
            numham: summary.ham,
        },
    })
}

async fn random_message(
    State(ctx): State<Arc<AppContext>>,
    Path(class): Path<String>,
) -> Result<Json<RandomMessageResponse>, ApiError> {
    let class: MessageClass = class
        .parse()
        .map_err(|_| ApiError::UnknownClass(class.clone()))?;

    let text = ctx
        .corpus
        .random_message(class, &mut rand::rng())
        .ok_or(ApiError::NoMessages(class.as_str()))?;

    Ok(Json(RandomMessageResponse {
        content: text.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_prediction() {
        assert_eq!(format_prediction(1), "100.0%");
        assert_eq!(format_prediction(0), "0.0%");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::MissingText.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnknownClass("eggs".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoMessages("ham").status(), StatusCode::NOT_FOUND);
    }
}
