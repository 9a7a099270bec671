use crate::handlers::{
    account::{login, register, show_login_form, show_registration_form},
    articles::{
        add::{add_article, show_add_form},
        edit::{delete_article, show_edit_form, update_article},
        list::list_articles,
    },
    health::health_check,
};
use crate::schemas::AppState;
use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { Redirect::to("/articles/list") }))
        // Article pages
        .route("/articles/list", get(list_articles))
        .route("/articles/add", get(show_add_form).post(add_article))
        .route("/articles/edit/:id", get(show_edit_form))
        .route("/articles/edit", post(update_article))
        .route("/articles/delete", post(delete_article))
        // Account pages
        .route("/account/register", get(show_registration_form).post(register))
        .route("/account/login", get(show_login_form).post(login))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
