use crate::models::ServiceError;
use crate::utils::document_store::{
    validate_collection_name, Document, DocumentPatch, DocumentStore, Filter, StoredDocument,
};
use log::{debug, error};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

type Collections = BTreeMap<String, Vec<StoredDocument>>;

/// In-process document store. Documents keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, ServiceError> {
        self.collections.lock().map_err(|e| {
            error!("Memory store lock poisoned: {:?}", e);
            ServiceError::InternalServerError
        })
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, collection: &str, body: Document) -> Result<String, ServiceError> {
        validate_collection_name(collection)?;
        let id = Uuid::new_v4().to_string();
        let mut collections = self.lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id: id.clone(), body });

        debug!("Inserted {} into {}", id, collection);
        Ok(id)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, ServiceError> {
        validate_collection_name(collection)?;
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update_one(&self, collection: &str, id: &str, patch: &DocumentPatch) -> Result<bool, ServiceError> {
        validate_collection_name(collection)?;
        let mut collections = self.lock()?;
        let document = match collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| document.id == id))
        {
            Some(document) => document,
            None => return Ok(false),
        };

        patch.apply(&mut document.body)?;
        debug!("Updated {} in {}", id, collection);
        Ok(true)
    }

    fn collection_names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}
