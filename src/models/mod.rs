// complaints-service/src/models/mod.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub mod auth;
pub use auth::*;

pub mod complaint;
pub use complaint::*;

pub mod team_member;
pub use team_member::*;

/// A persisted entity kind. Each kind lives in exactly one collection.
pub trait Entity: Serialize + DeserializeOwned {
    /// Name of the entity kind, e.g. `TeamMember`.
    const KIND: &'static str;

    // Collection identity is the kind name in lowercase
    fn collection_name() -> String {
        Self::KIND.to_lowercase()
    }
}

// Response to a successful create
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Created {
    pub id: String,
}

// Response to a successful single-document update
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

// Health report for the backing store
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoreStatus {
    pub backend: String,
    pub database: String,
    pub collections: Vec<String>,
}

// Custom error types
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ServiceError {
    #[display(fmt = "Database not configured")]
    StoreUnavailable,
    #[display(fmt = "Duplicate key: {}", _0)]
    DuplicateKey(String),
    #[display(fmt = "Not Found: {}", _0)]
    NotFound(String),
    #[display(fmt = "Invalid enum value: {}", _0)]
    InvalidEnumValue(String),
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,
    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Internal Server Error")]
    InternalServerError,
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    // Message returned to the caller in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            ServiceError::StoreUnavailable => "Database not configured".to_string(),
            ServiceError::DuplicateKey(field) => {
                let mut chars = field.chars();
                match chars.next() {
                    Some(first) => format!("{}{} already exists", first.to_uppercase(), chars.as_str()),
                    None => "Record already exists".to_string(),
                }
            }
            ServiceError::NotFound(kind) => format!("{} not found", kind),
            ServiceError::InvalidEnumValue(_) => "Invalid status".to_string(),
            ServiceError::InvalidCredentials => "Invalid credentials".to_string(),
            ServiceError::BadRequest(message) => message.clone(),
            ServiceError::InternalServerError => "Internal Server Error".to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::StoreUnavailable | ServiceError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::DuplicateKey(_)
            | ServiceError::InvalidEnumValue(_)
            | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.detail() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names_are_lowercase_kind() {
        assert_eq!(TeamMember::collection_name(), "teammember");
        assert_eq!(Complaint::collection_name(), "complaint");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ServiceError::StoreUnavailable.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ServiceError::DuplicateKey("username".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("Complaint".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::InvalidEnumValue("bogus".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_details() {
        assert_eq!(
            ServiceError::DuplicateKey("username".into()).detail(),
            "Username already exists"
        );
        assert_eq!(
            ServiceError::NotFound("Complaint".into()).detail(),
            "Complaint not found"
        );
        assert_eq!(ServiceError::StoreUnavailable.to_string(), "Database not configured");
    }
}
