use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::password::PasswordHasher;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Compiled page templates
    pub templates: Arc<Tera>,
    /// Hasher used for registration and login
    pub hasher: Arc<dyn PasswordHasher>,
    /// How the edit page treats a submission that changes nothing
    pub edit_policy: EditPolicy,
}

/// What an edit submission does when title and description match the stored article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Write nothing, commit nothing, tell the user the values are the same.
    #[default]
    SkipUnchanged,
    /// Write and commit the submitted values regardless.
    AlwaysOverwrite,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}
