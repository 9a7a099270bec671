use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;

pub async fn serve(settings: &Settings) -> Result<()> {
    trace!("Entering serve function");
    info!("Quire application starting up");
    debug!("Database URL: {}", settings.database_url);
    debug!("Bind address: {}", settings.bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state(settings).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state, settings.request_timeout());
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", settings.bind_address);
    let listener = match TcpListener::bind(&settings.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", settings.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", settings.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Quire running on http://{}/articles/list", settings.bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
