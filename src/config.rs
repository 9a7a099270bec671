use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use config::{Config, ConfigError, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info};

use crate::pages::load_templates;
use crate::password::Argon2Hasher;
use crate::schemas::{AppState, EditPolicy};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quire.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings.
///
/// Sources, later ones winning: built-in defaults, an optional `quire.toml`
/// (or `.yaml`/`.json`) in the working directory, then `QUIRE_*` environment
/// variables. CLI flags are applied on top by the commands.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub request_timeout_secs: u64,
    pub edit_policy: EditPolicy,
}

impl Settings {
    /// Load settings from the optional config file and the `QUIRE_*` environment.
    ///
    /// `.env` is loaded into the process environment by the CLI before this runs.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::with_prefix("QUIRE"))
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("quire").required(false))
                .add_source(environment),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        // Defaults sit below every source already added to the builder
        builder
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("request_timeout_secs", 30)?
            .set_default("edit_policy", "skip_unchanged")?
            .build()?
            .try_deserialize()
    }

    /// Apply values given on the command line.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Initialize application state for the given settings
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    debug!("Compiling page templates");
    let templates = load_templates()?;

    debug!("Edit policy: {:?}", settings.edit_policy);
    Ok(AppState {
        db,
        templates: Arc::new(templates),
        hasher: Arc::new(Argon2Hasher::new()),
        edit_policy: settings.edit_policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_builder(Config::builder()).unwrap();

        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.edit_policy, EditPolicy::SkipUnchanged);
    }

    #[test]
    fn test_sources_override_defaults() {
        let builder = Config::builder()
            .set_override("edit_policy", "always_overwrite")
            .unwrap()
            .set_override("request_timeout_secs", 5)
            .unwrap();
        let settings = Settings::from_builder(builder).unwrap();

        assert_eq!(settings.edit_policy, EditPolicy::AlwaysOverwrite);
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_unknown_edit_policy_is_rejected() {
        let builder = Config::builder()
            .set_override("edit_policy", "sometimes")
            .unwrap();

        assert!(Settings::from_builder(builder).is_err());
    }

    #[test]
    fn test_load_reads_prefixed_environment() {
        let environment = Environment::with_prefix("QUIRE").source(Some(
            [
                ("QUIRE_EDIT_POLICY", "always_overwrite"),
                ("QUIRE_REQUEST_TIMEOUT_SECS", "7"),
                ("QUIRE_BIND_ADDRESS", "127.0.0.1:8080"),
                ("DATABASE_URL", "sqlite://unprefixed.db"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ));

        let settings = Settings::load_with(environment).unwrap();

        assert_eq!(settings.edit_policy, EditPolicy::AlwaysOverwrite);
        assert_eq!(settings.request_timeout(), Duration::from_secs(7));
        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        // Only prefixed variables are read
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_load_without_environment_uses_defaults() {
        let environment = Environment::with_prefix("QUIRE").source(Some(Default::default()));

        let settings = Settings::load_with(environment).unwrap();

        assert_eq!(settings.edit_policy, EditPolicy::SkipUnchanged);
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_cli_overrides() {
        let settings = Settings::from_builder(Config::builder())
            .unwrap()
            .with_overrides(Some("sqlite::memory:".to_string()), None);

        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
    }
}
