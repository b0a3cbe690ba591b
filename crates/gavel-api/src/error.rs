//! Error → HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gavel_types::GavelError;
use serde_json::json;
use tracing::error;

/// Newtype so [`GavelError`] can cross the handler boundary with `?`.
#[derive(Debug)]
pub struct ApiError(pub GavelError);

impl From<GavelError> for ApiError {
    fn from(err: GavelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GavelError::Unauthorized => StatusCode::UNAUTHORIZED,
            GavelError::AuctionNotFound(_) => StatusCode::NOT_FOUND,
            GavelError::InvalidInput { .. }
            | GavelError::BiddingClosed { .. }
            | GavelError::BidTooLow { .. }
            | GavelError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal faults get a generic body; the detail goes to the log.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
