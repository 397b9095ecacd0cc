use crate::domain::model::SkippedCondition;
use crate::utils::error::StockError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No stock data available")]
    NoData,

    #[error("No filters provided")]
    NoFilters,

    #[error("{0}")]
    InvalidFilters(String),

    #[error("Invalid filters")]
    RejectedFilters(Vec<SkippedCondition>),

    #[error("Internal server error")]
    Internal(StockError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoData => StatusCode::NOT_FOUND,
            ApiError::NoFilters | ApiError::InvalidFilters(_) | ApiError::RejectedFilters(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidFilterPayload { .. } => ApiError::InvalidFilters(err.to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::RejectedFilters(skipped) => json!({"error": self.to_string(), "skipped": skipped}),
            ApiError::Internal(err) => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                json!({"error": self.to_string()})
            }
            _ => json!({"error": self.to_string()}),
        };
        (status, Json(body)).into_response()
    }
}
