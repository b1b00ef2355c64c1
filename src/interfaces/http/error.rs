use crate::error::{ErrorKind, ReservationError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Reservation(ReservationError),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Reservation(ReservationError::DuplicateFlightNumber(_)) => {
                StatusCode::CONFLICT
            }
            ApiError::Reservation(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::AlreadyBooked | ErrorKind::AlreadyCancelled => StatusCode::CONFLICT,
                ErrorKind::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
                ErrorKind::InvalidOperation | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::InternalInconsistency => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                msg
            }
            ApiError::Reservation(err) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Internal inconsistency: {}", err);
                err.to_string()
            }
            ApiError::Reservation(err) => {
                tracing::warn!("Request rejected: {}", err);
                err.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        Self::Reservation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
