// complaints-service/src/config.rs
use crate::utils::password::PasswordScheme;
use log::warn;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ADMIN_USERNAME: &str = "opengreen";
pub const DEFAULT_ADMIN_PASSWORD: &str = "ali12345";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub admin_username: String,
    pub admin_password: String,
    // No path means no store: every database operation fails
    pub storage_path: Option<PathBuf>,
    pub password_scheme: PasswordScheme,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            storage_path: None,
            password_scheme: PasswordScheme::Plaintext,
        }
    }
}

impl ServiceConfig {
    /// Read settings from the environment (and a `.env` file, if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Build from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let password_scheme = match lookup("PASSWORD_SCHEME") {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to plaintext", e);
                PasswordScheme::Plaintext
            }),
            None => defaults.password_scheme,
        };

        Self {
            admin_username: lookup("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            storage_path: lookup("DATABASE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            password_scheme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.admin_username, "opengreen");
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_values_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "secret"),
            ("DATABASE_PATH", "/var/lib/complaints"),
            ("PASSWORD_SCHEME", "bcrypt"),
        ]
        .into_iter()
        .collect();

        let config = ServiceConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.admin_username, "root");
        assert_eq!(config.admin_password, "secret");
        assert_eq!(config.storage_path, Some(PathBuf::from("/var/lib/complaints")));
        assert_eq!(config.password_scheme, PasswordScheme::Bcrypt);
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_plaintext() {
        let config = ServiceConfig::from_lookup(|key| match key {
            "PASSWORD_SCHEME" => Some("rot13".to_string()),
            "DATABASE_PATH" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.password_scheme, PasswordScheme::Plaintext);
        assert!(config.storage_path.is_none(), "blank path means no store");
    }
}
