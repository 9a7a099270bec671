#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::pages::load_templates;
    use crate::password::Argon2Hasher;
    use crate::router::create_router;
    use crate::schemas::{AppState, EditPolicy};
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state(edit_policy: EditPolicy) -> AppState {
        let db = setup_test_db().await;
        let templates = load_templates().expect("Failed to compile templates");

        AppState {
            db,
            templates: Arc::new(templates),
            hasher: Arc::new(Argon2Hasher::new()),
            edit_policy,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing, returning the state so tests can inspect the database
    pub async fn setup_test_app_with_policy(
        edit_policy: EditPolicy,
    ) -> (Router, AppState, tracing::subscriber::DefaultGuard) {
        let guard = init_test_tracing();

        let state = setup_test_app_state(edit_policy).await;
        let router = create_router(state.clone(), Duration::from_secs(30));
        (router, state, guard)
    }

    /// Create axum app for testing with the default edit policy
    pub async fn setup_test_app() -> (Router, AppState, tracing::subscriber::DefaultGuard) {
        setup_test_app_with_policy(EditPolicy::default()).await
    }
}
