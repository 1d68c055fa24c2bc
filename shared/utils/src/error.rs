use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vendora_models::DirectoryRejection;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum VendoraError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation failed: {}", join_field_errors(.errors))]
    Validation { errors: BTreeMap<String, String> },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {field} - {message}")]
    Conflict { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl VendoraError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// A single-field validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self::Validation { errors }
    }

    pub fn invalid(errors: BTreeMap<String, String>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Database { .. } => 500,
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

fn join_field_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type VendoraResult<T> = Result<T, VendoraError>;

/// Wire shape for every error the API returns. Validation failures carry
/// the per-field map in `details` so clients can render messages next to
/// each input.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<VendoraError> for ErrorResponse {
    fn from(error: VendoraError) -> Self {
        let details = match &error {
            VendoraError::Validation { errors } => serde_json::to_value(errors).ok(),
            _ => None,
        };
        Self {
            error: error.error_code().to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

// Conversion from common error types

impl From<sqlx::Error> for VendoraError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}

impl From<serde_json::Error> for VendoraError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization failed: {error}"))
    }
}

impl From<DirectoryRejection> for VendoraError {
    fn from(rejection: DirectoryRejection) -> Self {
        let message = rejection.to_string();
        match rejection {
            DirectoryRejection::EmptyName => Self::validation("name", message),
            DirectoryRejection::Duplicate(_)
            | DirectoryRejection::DefaultImmutable(_)
            | DirectoryRejection::Reserved(_) => Self::conflict("name", message),
            DirectoryRejection::Unknown(name) => Self::not_found(format!("directory entry '{name}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_statuses_line_up() {
        let error = VendoraError::validation("email", "must be a valid email address");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.http_status_code(), 400);

        assert_eq!(VendoraError::not_found("supplier").http_status_code(), 404);
        assert_eq!(
            VendoraError::conflict("email", "already in use").http_status_code(),
            409
        );
    }

    #[test]
    fn validation_response_carries_field_details() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), "must not be empty".to_string());
        errors.insert("email".to_string(), "must be a valid email address".to_string());

        let response = ErrorResponse::from(VendoraError::invalid(errors));
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("details present");
        assert_eq!(details["name"], "must not be empty");
        assert_eq!(details["email"], "must be a valid email address");
    }

    #[test]
    fn directory_rejections_map_to_the_error_taxonomy() {
        let conflict: VendoraError = DirectoryRejection::Duplicate("Parts".to_string()).into();
        assert_eq!(conflict.http_status_code(), 409);

        let immutable: VendoraError =
            DirectoryRejection::DefaultImmutable("Parts".to_string()).into();
        assert_eq!(immutable.http_status_code(), 409);

        let missing: VendoraError = DirectoryRejection::Unknown("Forging".to_string()).into();
        assert_eq!(missing.http_status_code(), 404);
    }
}
