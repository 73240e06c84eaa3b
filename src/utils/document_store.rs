// complaints-service/src/utils/document_store.rs
use crate::models::ServiceError;
use serde_json::{Map, Value};

/// A schema-flexible record as held by a store.
pub type Document = Map<String, Value>;

/// Field under which a document's identifier is reported to callers.
pub const ID_FIELD: &str = "_id";

/// Collection names are limited to `[a-z0-9_]`, whatever the backend.
pub fn validate_collection_name(collection: &str) -> Result<(), ServiceError> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(ServiceError::BadRequest(format!(
            "Invalid collection name '{}'",
            collection
        )));
    }
    Ok(())
}

// A stored document together with its generated identifier
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub body: Document,
}

impl StoredDocument {
    // Flatten into a plain mapping carrying the identifier as a string
    pub fn into_annotated(self) -> Document {
        let mut body = self.body;
        body.insert(ID_FIELD.to_string(), Value::String(self.id));
        body
    }
}

/// Conjunction of top-level field equalities. The empty filter matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, document: &StoredDocument) -> bool {
        self.0.iter().all(|(field, expected)| {
            if field == ID_FIELD {
                return expected.as_str() == Some(document.id.as_str());
            }
            document.body.get(field) == Some(expected)
        })
    }
}

/// Single-document update: `set` overwrites fields, `push` appends to array
/// fields. Both halves land in the same write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    set: Document,
    push: Document,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set.insert(field.to_string(), value.into());
        self
    }

    pub fn push(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.push.insert(field.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.push.is_empty()
    }

    /// Apply the patch in place. Every target is checked before anything
    /// changes, so a rejected patch leaves the document untouched.
    pub fn apply(&self, body: &mut Document) -> Result<(), ServiceError> {
        if self.set.contains_key(ID_FIELD) || self.push.contains_key(ID_FIELD) {
            return Err(ServiceError::BadRequest("The _id field is immutable".to_string()));
        }

        for field in self.push.keys() {
            match body.get(field) {
                None | Some(Value::Array(_)) => {}
                Some(_) => {
                    return Err(ServiceError::BadRequest(format!(
                        "Cannot push to non-array field '{}'",
                        field
                    )))
                }
            }
        }

        for (field, value) in &self.set {
            body.insert(field.clone(), value.clone());
        }

        for (field, value) in &self.push {
            if let Value::Array(items) = body
                .entry(field.clone())
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                items.push(value.clone());
            }
        }

        Ok(())
    }
}

/// A document store addressed by collection name.
///
/// Implementations must make `update_one` atomic for the single document it
/// touches. Nothing is promised across documents.
pub trait DocumentStore: Send + Sync {
    // Insert a document and return its generated identifier
    fn insert(&self, collection: &str, body: Document) -> Result<String, ServiceError>;

    // All documents matching the filter, in the store's natural order
    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, ServiceError>;

    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDocument>, ServiceError> {
        Ok(self.find(collection, filter)?.into_iter().next())
    }

    // Returns whether a document with this identifier was matched
    fn update_one(&self, collection: &str, id: &str, patch: &DocumentPatch) -> Result<bool, ServiceError>;

    fn collection_names(&self) -> Result<Vec<String>, ServiceError>;
}
