// src/services/team_service.rs

use crate::models::{Created, Entity, ServiceError, TeamCreate, TeamMember};
use crate::utils::password::PasswordScheme;
use crate::utils::{Database, Document, Filter};
use log::{error, info};

// Admin creates a team member account
pub fn create_team_member(
    db: &Database,
    scheme: PasswordScheme,
    data: TeamCreate,
) -> Result<Created, ServiceError> {
    info!("📝 Creating team member: {}", data.username);

    let collection_name = TeamMember::collection_name();
    let collection = db.collection(&collection_name)?;

    // Uniqueness is only enforced here, before the insert
    if collection.find_one(&Filter::eq("username", data.username.as_str()))?.is_some() {
        error!("❌ Username already exists: {}", data.username);
        return Err(ServiceError::DuplicateKey("username".to_string()));
    }

    let member = TeamMember::new(data.username, scheme.seal(&data.password)?, data.full_name);
    let id = db.create_document(&collection_name, &member)?;

    info!("✅ Team member created: {} ({})", member.username, id);
    Ok(Created { id })
}

pub fn list_team(db: &Database) -> Result<Vec<Document>, ServiceError> {
    let members = db.get_documents(&TeamMember::collection_name(), &Filter::all())?;
    info!("📋 Found {} team members", members.len());
    Ok(members)
}
