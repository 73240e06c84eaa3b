pub mod clock;
pub mod database;
pub mod document_store;
pub mod json_store;
pub mod memory_store;

pub use database::{Collection, Database};
pub use document_store::{Document, DocumentPatch, DocumentStore, Filter, StoredDocument, ID_FIELD};
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

// Password utility functions
pub mod password {
    use crate::models::ServiceError;
    use bcrypt::{hash, verify, DEFAULT_COST};
    use log::{error, warn};
    use std::str::FromStr;

    /// How team-member passwords are stored and compared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum PasswordScheme {
        // Stored as given and compared verbatim
        #[default]
        Plaintext,
        Bcrypt,
    }

    impl PasswordScheme {
        // Turn a password into its stored form
        pub fn seal(&self, password: &str) -> Result<String, ServiceError> {
            match self {
                PasswordScheme::Plaintext => Ok(password.to_string()),
                PasswordScheme::Bcrypt => hash(password, DEFAULT_COST).map_err(|e| {
                    error!("Failed to hash password: {:?}", e);
                    ServiceError::InternalServerError
                }),
            }
        }

        // Check a candidate password against its stored form
        pub fn verify(&self, candidate: &str, stored: &str) -> bool {
            match self {
                PasswordScheme::Plaintext => candidate == stored,
                PasswordScheme::Bcrypt => verify(candidate, stored).unwrap_or_else(|e| {
                    warn!("Stored password is not a bcrypt hash: {:?}", e);
                    false
                }),
            }
        }
    }

    impl FromStr for PasswordScheme {
        type Err = ServiceError;

        fn from_str(value: &str) -> Result<Self, Self::Err> {
            match value.trim().to_lowercase().as_str() {
                "plaintext" | "plain" => Ok(PasswordScheme::Plaintext),
                "bcrypt" => Ok(PasswordScheme::Bcrypt),
                other => Err(ServiceError::BadRequest(format!(
                    "Unknown password scheme '{}'",
                    other
                ))),
            }
        }
    }

}
