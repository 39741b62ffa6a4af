use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Closed error taxonomy for the service.
///
/// Every failure is converted to one of these at the boundary where it
/// happens; handlers never see raw reqwest/mongodb errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    BadInput { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}: {details}")]
    UpstreamFailure { message: String, details: String },

    #[error("{message}: {details}")]
    StoreFailure { message: String, details: String },
}

impl ServiceError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>, details: impl ToString) -> Self {
        Self::UpstreamFailure {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn store(message: impl Into<String>, details: impl ToString) -> Self {
        Self::StoreFailure {
            message: message.into(),
            details: details.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServiceError::BadInput { message } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            // Empty query results are a normal outcome, so the body carries a
            // plain message instead of an error key.
            ServiceError::NotFound { message } => {
                (StatusCode::NOT_FOUND, json!({ "message": message }))
            }
            ServiceError::UpstreamFailure { message, details }
            | ServiceError::StoreFailure { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "details": details }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
