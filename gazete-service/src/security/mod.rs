pub mod auth_service;

pub use auth_service::{AdminSession, AdminUser, AuthService, DefaultAuthService};
