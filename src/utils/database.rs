// complaints-service/src/utils/database.rs
use crate::config::ServiceConfig;
use crate::models::ServiceError;
use crate::utils::clock::MonotonicClock;
use crate::utils::document_store::{Document, DocumentPatch, DocumentStore, Filter, StoredDocument};
use crate::utils::json_store::JsonFileStore;
use crate::utils::memory_store::MemoryStore;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Persistence gateway. Holds the store connection, which may be absent when
/// no store was configured; every operation re-checks it.
#[derive(Clone, Default)]
pub struct Database {
    store: Option<Arc<dyn DocumentStore>>,
    clock: Arc<MonotonicClock>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: Some(store),
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // A gateway with no store behind it
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        match &config.storage_path {
            Some(path) => {
                let store = JsonFileStore::open(path)?;
                info!("📂 Document store opened at {}", store.root().display());
                Ok(Self::new(Arc::new(store)))
            }
            None => {
                warn!("No storage path configured, database operations will fail");
                Ok(Self::unconfigured())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    // Timestamp source for mutations; strictly increasing per gateway
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Resolve a named collection from the active connection.
    pub fn collection(&self, name: &str) -> Result<Collection<'_>, ServiceError> {
        match &self.store {
            Some(store) => Ok(Collection {
                name: name.to_string(),
                store: store.as_ref(),
            }),
            None => {
                error!("❌ Database not configured, cannot access collection: {}", name);
                Err(ServiceError::StoreUnavailable)
            }
        }
    }

    /// Serialize a record (defaults already applied) and insert it.
    pub fn create_document<T: Serialize>(&self, collection_name: &str, record: &T) -> Result<String, ServiceError> {
        let collection = self.collection(collection_name)?;
        let body = match serde_json::to_value(record) {
            Ok(Value::Object(body)) => body,
            Ok(other) => {
                error!("Record for {} is not a mapping: {}", collection_name, other);
                return Err(ServiceError::InternalServerError);
            }
            Err(e) => {
                error!("Failed to serialize record for {}: {:?}", collection_name, e);
                return Err(ServiceError::InternalServerError);
            }
        };
        collection.insert_one(body)
    }

    /// All documents matching the filter, each annotated with `_id`.
    pub fn get_documents(&self, collection_name: &str, filter: &Filter) -> Result<Vec<Document>, ServiceError> {
        self.collection(collection_name)?.find(filter)
    }

    pub fn collection_names(&self) -> Result<Vec<String>, ServiceError> {
        match &self.store {
            Some(store) => store.collection_names(),
            None => Err(ServiceError::StoreUnavailable),
        }
    }
}

// Handle to one collection of the active store
pub struct Collection<'a> {
    name: String,
    store: &'a dyn DocumentStore,
}

impl<'a> Collection<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert_one(&self, body: Document) -> Result<String, ServiceError> {
        self.store.insert(&self.name, body)
    }

    pub fn find(&self, filter: &Filter) -> Result<Vec<Document>, ServiceError> {
        Ok(self
            .store
            .find(&self.name, filter)?
            .into_iter()
            .map(StoredDocument::into_annotated)
            .collect())
    }

    pub fn find_one(&self, filter: &Filter) -> Result<Option<Document>, ServiceError> {
        Ok(self
            .store
            .find_one(&self.name, filter)?
            .map(StoredDocument::into_annotated))
    }

    // Single-document conditional update; false when no document has this id
    pub fn update_one(&self, id: &str, patch: &DocumentPatch) -> Result<bool, ServiceError> {
        self.store.update_one(&self.name, id, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Complaint, Entity, TeamMember};
    use serde_json::json;

    #[test]
    fn test_unconfigured_store_is_unavailable() {
        let db = Database::unconfigured();
        let member = TeamMember::new("alice".into(), "pw1".into(), None);

        assert!(!db.is_configured());
        assert!(matches!(db.collection("teammember"), Err(ServiceError::StoreUnavailable)));
        assert_eq!(
            db.create_document(&TeamMember::collection_name(), &member),
            Err(ServiceError::StoreUnavailable)
        );
        assert_eq!(
            db.get_documents("teammember", &Filter::all()),
            Err(ServiceError::StoreUnavailable)
        );
    }

    #[test]
    fn test_create_then_list_annotates_ids() {
        let db = Database::in_memory();
        let complaint = Complaint::new("No signal".into(), "Since Monday".into());

        let id = db.create_document(&Complaint::collection_name(), &complaint).unwrap();
        let documents = db.get_documents("complaint", &Filter::all()).unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["_id"], json!(id));
        assert_eq!(documents[0]["status"], "pending");
        assert_eq!(documents[0]["notes"], json!([]));
    }

    #[test]
    fn test_non_mapping_records_are_rejected() {
        let db = Database::in_memory();
        assert_eq!(
            db.create_document("complaint", &vec![1, 2, 3]),
            Err(ServiceError::InternalServerError)
        );
    }

    #[test]
    fn test_from_config_without_path_is_unconfigured() {
        let db = Database::from_config(&ServiceConfig::default()).unwrap();
        assert!(!db.is_configured());
    }
}
