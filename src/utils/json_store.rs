// complaints-service/src/utils/json_store.rs
use crate::models::ServiceError;
use crate::utils::document_store::{
    validate_collection_name, Document, DocumentPatch, DocumentStore, Filter, StoredDocument,
};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Document store kept on disk: one directory per collection, one
/// `<id>.json` file per document.
pub struct JsonFileStore {
    root: PathBuf,
    // Serialises writers so each update is a whole read-modify-write
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    // Open (and create if needed) a store rooted at the given directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let root = root.into();
        if !root.exists() {
            info!("Creating storage directory: {}", root.display());
            fs::create_dir_all(&root).map_err(|e| {
                error!("Failed to create storage directory: {:?}", e);
                ServiceError::InternalServerError
            })?;
        }

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, ServiceError> {
        self.write_lock.lock().map_err(|e| {
            error!("Storage write lock poisoned: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    // Collection names become directory names, so keep them to a safe alphabet
    fn collection_dir(&self, collection: &str) -> Result<PathBuf, ServiceError> {
        validate_collection_name(collection)?;
        Ok(self.root.join(collection))
    }

    // Only canonical UUID stems name documents; other files are ignored
    fn document_id(path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        let id = Uuid::parse_str(stem).ok()?.hyphenated().to_string();
        (id == stem).then_some(id)
    }

    // Identifiers are always UUIDs; anything else cannot name a document
    fn document_path(&self, collection: &str, id: &str) -> Result<Option<PathBuf>, ServiceError> {
        let dir = self.collection_dir(collection)?;
        Ok(Uuid::parse_str(id)
            .ok()
            .map(|uuid| dir.join(format!("{}.json", uuid.hyphenated()))))
    }

    fn write_document(path: &Path, body: &Document) -> Result<(), ServiceError> {
        let json = serde_json::to_string_pretty(body).map_err(|e| {
            error!("Failed to serialize document: {:?}", e);
            ServiceError::InternalServerError
        })?;

        // Readers never take the lock, so they must only ever see whole files
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            error!("Failed to write document {}: {:?}", tmp_path.display(), e);
            ServiceError::InternalServerError
        })?;

        fs::rename(&tmp_path, path).map_err(|e| {
            error!("Failed to replace document {}: {:?}", path.display(), e);
            let _ = fs::remove_file(&tmp_path);
            ServiceError::InternalServerError
        })
    }

    fn read_document(path: &Path) -> Result<Document, ServiceError> {
        let content = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read document {}: {:?}", path.display(), e);
            ServiceError::InternalServerError
        })?;

        serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse document {}: {:?}", path.display(), e);
            ServiceError::InternalServerError
        })
    }
}

impl DocumentStore for JsonFileStore {
    fn insert(&self, collection: &str, body: Document) -> Result<String, ServiceError> {
        let dir = self.collection_dir(collection)?;
        let _guard = self.lock()?;

        fs::create_dir_all(&dir).map_err(|e| {
            error!("Failed to create collection directory {}: {:?}", dir.display(), e);
            ServiceError::InternalServerError
        })?;

        let id = Uuid::new_v4().to_string();
        Self::write_document(&dir.join(format!("{}.json", id)), &body)?;

        debug!("Saved document {} in {}", id, collection);
        Ok(id)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, ServiceError> {
        let dir = self.collection_dir(collection)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry_result in fs::read_dir(&dir).map_err(|e| {
            error!("Failed to read collection directory: {:?}", e);
            ServiceError::InternalServerError
        })? {
            let entry = entry_result.map_err(|e| {
                error!("Failed to read directory entry: {:?}", e);
                ServiceError::InternalServerError
            })?;

            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            let id = match Self::document_id(&path) {
                Some(id) => id,
                None => {
                    warn!("Skipping file that is not a document: {}", path.display());
                    continue;
                }
            };

            let body = match Self::read_document(&path) {
                Ok(body) => body,
                Err(_) => {
                    warn!("Skipping unreadable document: {}", path.display());
                    continue;
                }
            };

            let document = StoredDocument { id, body };
            if filter.matches(&document) {
                documents.push(document);
            }
        }

        Ok(documents)
    }

    fn update_one(&self, collection: &str, id: &str, patch: &DocumentPatch) -> Result<bool, ServiceError> {
        let path = match self.document_path(collection, id)? {
            Some(path) => path,
            None => return Ok(false),
        };

        let _guard = self.lock()?;
        if !path.exists() {
            return Ok(false);
        }

        let mut body = Self::read_document(&path)?;
        patch.apply(&mut body)?;
        Self::write_document(&path, &body)?;

        debug!("Updated document {} in {}", id, collection);
        Ok(true)
    }

    fn collection_names(&self) -> Result<Vec<String>, ServiceError> {
        let mut names = Vec::new();
        for entry_result in fs::read_dir(&self.root).map_err(|e| {
            error!("Failed to read storage directory: {:?}", e);
            ServiceError::InternalServerError
        })? {
            let entry = entry_result.map_err(|e| {
                error!("Failed to read directory entry: {:?}", e);
                ServiceError::InternalServerError
            })?;

            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_owned());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn body(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_documents_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let id = {
            let store = JsonFileStore::open(dir.path()).unwrap();
            store.insert("complaint", body(json!({ "title": "No signal" }))).unwrap()
        };

        let store = JsonFileStore::open(dir.path()).unwrap();
        let found = store.find_one("complaint", &Filter::eq("_id", id.as_str())).unwrap();

        let found = found.expect("document should be read back from disk");
        assert_eq!(found.id, id);
        assert_eq!(found.body["title"], "No signal");
        assert!(dir.path().join("complaint").join(format!("{}.json", id)).exists());
    }

    #[test]
    fn test_update_patches_the_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let id = store.insert("complaint", body(json!({ "status": "pending" }))).unwrap();

        let patch = DocumentPatch::new().set("status", "progress").push("notes", json!({ "text": "hi" }));
        assert!(store.update_one("complaint", &id, &patch).unwrap());

        let found = store.find("complaint", &Filter::all()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body["status"], "progress");
        assert_eq!(found[0].body["notes"], json!([{ "text": "hi" }]));
    }

    #[test]
    fn test_non_uuid_ids_never_match() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.insert("complaint", body(json!({ "title": "t" }))).unwrap();

        let patch = DocumentPatch::new().set("status", "hold");
        assert!(!store.update_one("complaint", "../teammember/x", &patch).unwrap());
        assert!(!store
            .update_one("complaint", &Uuid::new_v4().to_string(), &patch)
            .unwrap());
    }

    #[test]
    fn test_corrupt_documents_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.insert("teammember", body(json!({ "username": "alice" }))).unwrap();
        let broken = dir.path().join("teammember").join(format!("{}.json", Uuid::new_v4()));
        fs::write(broken, "{ not json").unwrap();

        let found = store.find("teammember", &Filter::all()).unwrap();
        assert_eq!(found.len(), 1, "corrupt file should be ignored");
    }

    #[test]
    fn test_listed_ids_are_always_updatable() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.insert("complaint", body(json!({ "title": "real" }))).unwrap();
        fs::write(dir.path().join("complaint").join("notes.json"), r#"{ "title": "stray" }"#).unwrap();

        let found = store.find("complaint", &Filter::all()).unwrap();
        assert_eq!(found.len(), 1, "files without a UUID name are not documents");
        assert_eq!(found[0].body["title"], "real");

        let patch = DocumentPatch::new().set("status", "hold");
        for document in found {
            assert!(store.update_one("complaint", &document.id, &patch).unwrap());
        }
    }

    #[test]
    fn test_readers_never_see_partial_writes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).unwrap());
        let id = store
            .insert("complaint", body(json!({ "assigned_to": "alice", "notes": [] })))
            .unwrap();

        let writer = {
            let store = Arc::clone(&store);
            let id = id.clone();
            thread::spawn(move || {
                let text = "x".repeat(4096);
                for _ in 0..200 {
                    let patch = DocumentPatch::new().push("notes", json!({ "text": text }));
                    assert!(store.update_one("complaint", &id, &patch).unwrap());
                }
            })
        };

        let filter = Filter::eq("assigned_to", "alice");
        while !writer.is_finished() {
            let found = store.find("complaint", &filter).unwrap();
            assert_eq!(found.len(), 1, "complaint must stay visible while it is being updated");
        }
        writer.join().unwrap();

        let found = store.find("complaint", &filter).unwrap();
        assert_eq!(found[0].body["notes"].as_array().unwrap().len(), 200);
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("complaint"))
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temporary files must be renamed into place");
    }

    #[test]
    fn test_collection_names_and_validation() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.insert("teammember", body(json!({}))).unwrap();
        store.insert("complaint", body(json!({}))).unwrap();

        assert_eq!(store.collection_names().unwrap(), vec!["complaint", "teammember"]);
        assert!(matches!(
            store.insert("../escape", body(json!({}))),
            Err(ServiceError::BadRequest(_))
        ));
    }
}
