//! HTTP error mapping.
//!
//! Business rejections surface as 4xx with their own message; anything
//! unexpected becomes a 500 with a generic message and the detail goes to
//! the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use utoipa::ToSchema;
use wardline_core::HospitalError;

/// JSON failure body, `{ "message": ... }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<HospitalError> for ApiError {
    fn from(err: HospitalError) -> Self {
        match &err {
            HospitalError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            HospitalError::Validation(_)
            | HospitalError::NoBedAvailable { .. }
            | HospitalError::InvalidCredentials
            | HospitalError::PendingApproval => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            HospitalError::Consistency(_)
            | HospitalError::SnapshotRead(_)
            | HospitalError::SnapshotWrite(_)
            | HospitalError::SnapshotSerialize(_)
            | HospitalError::SnapshotDeserialize(_)
            | HospitalError::PasswordHash(_) => {
                tracing::error!("internal error: {err}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}
