//! Error types for the analyzer core and the services around it

use alloy::primitives::Address;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::SessionId;

/// Rejections raised by the ledger core. A rejected operation never leaves
/// partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Caller lacks the role the operation requires
    #[error("Unauthorized: {0} lacks the required role")]
    Unauthorized(Address),

    /// Caller already owns an artist profile
    #[error("Already registered: {0} already has an artist profile")]
    AlreadyRegistered(Address),

    /// Caller has no artist profile
    #[error("Not registered: {0} has no artist profile")]
    NotRegistered(Address),

    /// No aggregate report was generated for the session
    #[error("Report not found for session {0}")]
    ReportNotFound(SessionId),
}

impl ContractError {
    /// Stable name of the rejection, used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::Unauthorized(_) => "Unauthorized",
            ContractError::AlreadyRegistered(_) => "AlreadyRegistered",
            ContractError::NotRegistered(_) => "NotRegistered",
            ContractError::ReportNotFound(_) => "ReportNotFound",
        }
    }

    /// Rebuild a rejection from its wire name. `caller` and `session` fill in
    /// the context the remote side does not echo back.
    pub fn from_kind(kind: &str, caller: Address, session: SessionId) -> Option<Self> {
        match kind {
            "Unauthorized" => Some(ContractError::Unauthorized(caller)),
            "AlreadyRegistered" => Some(ContractError::AlreadyRegistered(caller)),
            "NotRegistered" => Some(ContractError::NotRegistered(caller)),
            "ReportNotFound" => Some(ContractError::ReportNotFound(session)),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Request signature missing, stale or not matching the claimed caller
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wire name of the error, shared with [`ContractError::kind`]
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Contract(e) => e.kind(),
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidSignature(_) => "InvalidSignature",
            AppError::Config(_) => "Config",
            AppError::Io(_) => "Io",
            AppError::Serialization(_) => "Serialization",
            AppError::Http(_) => "Http",
            AppError::Remote { .. } => "Remote",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Contract(ContractError::Unauthorized(_)) => StatusCode::FORBIDDEN,
            AppError::Contract(ContractError::AlreadyRegistered(_)) => StatusCode::CONFLICT,
            AppError::Contract(ContractError::NotRegistered(_)) => StatusCode::NOT_FOUND,
            AppError::Contract(ContractError::ReportNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidSignature(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type ContractResult<T> = Result<T, ContractError>;

pub type AppResult<T> = Result<T, AppError>;
