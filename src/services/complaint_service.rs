// src/services/complaint_service.rs

use crate::models::{
    Ack, Complaint, ComplaintCreate, ComplaintStatus, Created, Entity, Note, NoteCreate, ServiceError,
    StatusUpdate,
};
use crate::utils::{Database, Document, DocumentPatch, Filter};
use log::{error, info};
use serde::Serialize;
use serde_json::Value;

const COMPLAINT: &str = "Complaint";

fn to_value<T: Serialize>(value: &T) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Failed to serialize value: {:?}", e);
        ServiceError::InternalServerError
    })
}

// Admin creates a complaint, optionally assigned to a team member
pub fn create_complaint(db: &Database, data: ComplaintCreate) -> Result<Created, ServiceError> {
    info!("📝 Creating complaint: {}", data.title);

    let complaint = Complaint::from(data);
    let id = db.create_document(&Complaint::collection_name(), &complaint)?;

    info!("✅ Complaint created: {}", id);
    Ok(Created { id })
}

/// List complaints, narrowed to one assignee when a non-empty username is given.
pub fn list_complaints(db: &Database, assigned_to: Option<&str>) -> Result<Vec<Document>, ServiceError> {
    let filter = match assigned_to {
        Some(username) if !username.is_empty() => Filter::eq("assigned_to", username),
        _ => Filter::all(),
    };

    let complaints = db.get_documents(&Complaint::collection_name(), &filter)?;
    info!("📋 Found {} complaints", complaints.len());
    Ok(complaints)
}

// Complaints assigned to one team member
pub fn team_complaints(db: &Database, username: &str) -> Result<Vec<Document>, ServiceError> {
    let complaints = db.get_documents(
        &Complaint::collection_name(),
        &Filter::eq("assigned_to", username),
    )?;
    info!("📋 Found {} complaints for: {}", complaints.len(), username);
    Ok(complaints)
}

/// Move a complaint to a new status. The value is checked before any write,
/// and `status` and `updated_at` change together.
pub fn update_status(db: &Database, complaint_id: &str, data: StatusUpdate) -> Result<Ack, ServiceError> {
    info!("🔄 Updating status of complaint: {} to: {}", complaint_id, data.status);

    let status: ComplaintStatus = data.status.parse().map_err(|e| {
        error!("❌ Invalid status: {}", data.status);
        e
    })?;

    let collection = db.collection(&Complaint::collection_name())?;
    let patch = DocumentPatch::new()
        .set("status", status.as_str())
        .set("updated_at", to_value(&db.now())?);

    if !collection.update_one(complaint_id, &patch)? {
        error!("❌ Complaint not found: {}", complaint_id);
        return Err(ServiceError::NotFound(COMPLAINT.to_string()));
    }

    info!("✅ Complaint {} is now {}", complaint_id, status);
    Ok(Ack::ok())
}

/// Append a timestamped note and bump `updated_at` in the same write.
pub fn add_note(
    db: &Database,
    complaint_id: &str,
    data: NoteCreate,
    username: Option<String>,
) -> Result<Ack, ServiceError> {
    info!("📝 Adding note to complaint: {}", complaint_id);

    let collection = db.collection(&Complaint::collection_name())?;
    let now = db.now();
    let note = Note {
        username,
        text: data.text,
        timestamp: now,
    };
    let patch = DocumentPatch::new()
        .push("notes", to_value(&note)?)
        .set("updated_at", to_value(&now)?);

    if !collection.update_one(complaint_id, &patch)? {
        error!("❌ Complaint not found: {}", complaint_id);
        return Err(ServiceError::NotFound(COMPLAINT.to_string()));
    }

    info!("✅ Note added to complaint: {}", complaint_id);
    Ok(Ack::ok())
}
