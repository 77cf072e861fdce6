//! Error types for ScaleLab

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for simulator operations
pub type SimulatorResult<T> = Result<T, SimulationError>;

/// Main error type for simulation operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A blueprint names a node type outside the supported set.
    #[error("Configuration error: unrecognized node type '{node_type}' for node '{id}'")]
    UnknownNodeType { id: String, node_type: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        param: Option<String>,
    },

    // Settings errors
    #[error("Settings error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error envelope returned by the HTTP API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: ErrorDetail {
                message: message.to_string(),
                error_type: error_type.to_string(),
                param: None,
            },
        }
    }

    pub fn with_param(mut self, param: &str) -> Self {
        self.error.param = Some(param.to_string());
        self
    }
}

impl SimulationError {
    /// Shorthand for a validation error tied to a request field.
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            param: Some(param.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownNodeType { .. } => StatusCode::BAD_REQUEST,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &str {
        match self {
            Self::UnknownNodeType { .. } => "configuration_error",
            Self::Validation { .. } => "invalid_request_error",
            Self::Config(_) => "settings_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the caller supplied a blueprint the engine cannot build.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnknownNodeType { .. })
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_type(), &self.to_string());

        match self {
            Self::Validation { param: Some(p), .. } => response.with_param(p),
            Self::UnknownNodeType { .. } => response.with_param("blueprint.nodes.type"),
            _ => response,
        }
    }
}

impl IntoResponse for SimulationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_error_response())).into_response()
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation {
            message: err.to_string(),
            param: None,
        }
    }
}
