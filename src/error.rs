use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid service configuration: {0}")]
    InvalidServiceConfig(String),

    #[error("Invalid capability document: {0}")]
    InvalidDocument(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub description: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, description) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NotFound", msg.clone()),
            AppError::MalformedIdentifier(msg) => (
                StatusCode::BAD_REQUEST,
                "MalformedIdentifier",
                msg.clone(),
            ),
            AppError::UnsupportedFormat(msg) => {
                (StatusCode::BAD_REQUEST, "UnsupportedFormat", msg.clone())
            }
            AppError::InvalidServiceConfig(msg) => {
                tracing::error!("Invalid service configuration: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InvalidServiceConfig",
                    "The service is misconfigured".to_string(),
                )
            }
            AppError::InvalidDocument(msg) => {
                tracing::error!("Invalid capability document: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InvalidDocument",
                    "The service produced an invalid capability document".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SerializationError",
                    "Serialization error occurred".to_string(),
                )
            }
            AppError::Yaml(e) => {
                tracing::error!("YAML serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SerializationError",
                    "Serialization error occurred".to_string(),
                )
            }
            AppError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ConfigError",
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.to_string(),
            description,
        });

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
