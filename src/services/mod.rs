// src/services/mod.rs
pub mod auth_service;
pub mod complaint_service;
pub mod health_service;
pub mod team_service;

pub use auth_service::Authenticator;
