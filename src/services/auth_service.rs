// src/services/auth_service.rs

use crate::config::ServiceConfig;
use crate::models::{Entity, LoginRequest, LoginResponse, Role, ServiceError, TeamMember};
use crate::utils::{Database, Filter};
use log::{error, info, warn};

/// Single place where credentials are checked. Callers only see the role a
/// username/password pair resolves to, never how passwords are compared.
pub struct Authenticator<'a> {
    db: &'a Database,
    config: &'a ServiceConfig,
}

impl<'a> Authenticator<'a> {
    pub fn new(db: &'a Database, config: &'a ServiceConfig) -> Self {
        Self { db, config }
    }

    /// Resolve a username/password pair to a role, administrator first.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<Role>, ServiceError> {
        if self.is_admin(username, password) {
            return Ok(Some(Role::Admin));
        }

        Ok(self
            .find_active_member(username, password)?
            .map(|_| Role::Team))
    }

    pub fn admin_login(&self, payload: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        info!("🔑 Admin login request for: {}", payload.username);

        if self.is_admin(&payload.username, &payload.password) {
            info!("✅ Admin logged in");
            return Ok(LoginResponse {
                role: Role::Admin,
                username: self.config.admin_username.clone(),
            });
        }

        error!("❌ Invalid admin credentials for: {}", payload.username);
        Err(ServiceError::InvalidCredentials)
    }

    pub fn team_login(&self, payload: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        info!("🔑 Team login request for: {}", payload.username);

        match self.find_active_member(&payload.username, &payload.password)? {
            Some(member) => {
                info!("✅ Team member logged in: {}", member.username);
                Ok(LoginResponse {
                    role: Role::Team,
                    username: member.username,
                })
            }
            None => {
                error!("❌ Invalid team credentials for: {}", payload.username);
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    fn is_admin(&self, username: &str, password: &str) -> bool {
        username == self.config.admin_username && password == self.config.admin_password
    }

    // Inactive members never authenticate, even with a matching password
    fn find_active_member(&self, username: &str, password: &str) -> Result<Option<TeamMember>, ServiceError> {
        let collection = self.db.collection(&TeamMember::collection_name())?;
        let candidates = collection.find(&Filter::eq("username", username).and("is_active", true))?;

        for document in candidates {
            let member: TeamMember = match serde_json::from_value(document.into()) {
                Ok(member) => member,
                Err(e) => {
                    warn!("Skipping malformed team member record: {:?}", e);
                    continue;
                }
            };

            if self.config.password_scheme.verify(password, &member.password) {
                return Ok(Some(member));
            }
        }

        Ok(None)
    }
}
