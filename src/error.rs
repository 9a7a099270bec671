use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Failures a page handler cannot recover from.
///
/// Expected outcomes (missing article, invalid form) are never errors; they
/// re-render the page. Everything here ends on the generic error page.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error while rendering a page template
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Error from hashing or verifying a password
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

const ERROR_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>Error - Quire</title></head>\
<body><h1>Something went wrong</h1>\
<p>An error occurred while processing your request.</p>\
<p><a href=\"/articles/list\">Back to articles</a></p></body></html>";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}
