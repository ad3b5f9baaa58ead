use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use farmchain_ledger::LedgerError;
use farmchain_registry::RegistryError;
use farmchain_types::TypeError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("bad request: {0}")]
    BadRequest(#[from] TypeError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(LedgerError::BatchNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Ledger(LedgerError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Ledger(LedgerError::Conflict { .. }) => StatusCode::CONFLICT,
            Self::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Registry(RegistryError::BatchNotFound(_))
            | Self::Registry(RegistryError::TokenNotFound) => StatusCode::NOT_FOUND,
            Self::Registry(RegistryError::InvalidTransition { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
