use crate::models::{Entity, Role};
use serde::{Deserialize, Serialize};

// Team members always carry the fixed `team` role; the wire form is Role's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Role", into = "Role")]
pub enum MemberRole {
    #[default]
    Team,
}

impl TryFrom<Role> for MemberRole {
    type Error = String;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Team => Ok(MemberRole::Team),
            other => Err(format!("team members cannot hold the {:?} role", other)),
        }
    }
}

impl From<MemberRole> for Role {
    fn from(_: MemberRole) -> Self {
        Role::Team
    }
}

/// A team member account, created by the administrator.
///
/// `username` is unique within the `teammember` collection. Uniqueness is
/// checked before insert, the store itself does not enforce it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub username: String,
    /// Stored as sealed by the configured password scheme (plaintext by default).
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Entity for TeamMember {
    const KIND: &'static str = "TeamMember";
}

impl TeamMember {
    // Create a member with defaults applied
    pub fn new(username: String, password: String, full_name: Option<String>) -> Self {
        Self {
            username,
            password,
            full_name,
            role: MemberRole::Team,
            is_active: true,
        }
    }
}

// Request to create a team member
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamCreate {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}
