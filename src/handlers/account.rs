//! Account pages: registration and the login page it redirects to.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tokio::task;
use tracing::{debug, info, instrument, trace, warn};
use validator::Validate;

use crate::context::DataContext;
use crate::error::AppError;
use crate::pages::{error_messages, render, ViewData, ACCOUNT_LOGIN, ACCOUNT_REGISTER};
use crate::schemas::AppState;
use crate::view_models::{LoginViewModel, RegistrationViewModel};

const USERNAME_TAKEN: &str = "Username is already taken";

/// Show an empty registration form
#[instrument(skip(state))]
pub async fn show_registration_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    trace!("Entering show_registration_form function");
    render(
        &state.templates,
        ACCOUNT_REGISTER,
        &RegistrationViewModel::default(),
        &ViewData::default(),
    )
}

/// Register a new user and send them to the login page
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ctx: DataContext,
    Form(form): Form<RegistrationViewModel>,
) -> Result<Response, AppError> {
    trace!("Entering register function");
    debug!("Registering user with username: {}", form.username);

    let mut errors = match form.validate() {
        Ok(()) => Vec::new(),
        Err(e) => error_messages(&e),
    };

    if errors.is_empty() && ctx.users().find_by_username(&form.username).await?.is_some() {
        errors.push(USERNAME_TAKEN.to_string());
    }

    if !errors.is_empty() {
        debug!("Registration form rejected: {}", errors.join(", "));
        return Ok(render(
            &state.templates,
            ACCOUNT_REGISTER,
            &form,
            &ViewData::with_errors(errors),
        )?
        .into_response());
    }

    // Argon2 is deliberately slow, keep it off the async workers
    let hasher = state.hasher.clone();
    let password = form.password.clone();
    let password_hash = task::spawn_blocking(move || hasher.hash(&password)).await??;

    // A concurrent registration can still claim the name between lookup and insert
    let Some(user) = ctx.users().try_add(form.to_new_user(password_hash)).await? else {
        warn!("Username {} was taken during registration", form.username);
        return Ok(render(
            &state.templates,
            ACCOUNT_REGISTER,
            &form,
            &ViewData::with_errors(vec![USERNAME_TAKEN.to_string()]),
        )?
        .into_response());
    };
    ctx.save().await?;
    info!("User registered with ID: {}, username: {}", user.id, user.username);

    Ok(Redirect::to("/account/login").into_response())
}

/// Show an empty login form
#[instrument(skip(state))]
pub async fn show_login_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    trace!("Entering show_login_form function");
    render(
        &state.templates,
        ACCOUNT_LOGIN,
        &LoginViewModel::default(),
        &ViewData::default(),
    )
}

/// Check submitted credentials against the stored hash.
///
/// No session is issued; the page only reports whether the credentials match.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ctx: DataContext,
    Form(form): Form<LoginViewModel>,
) -> Result<Html<String>, AppError> {
    trace!("Entering login function");

    let verified = match ctx.users().find_by_username(&form.username).await? {
        Some(user) => {
            let hasher = state.hasher.clone();
            let password = form.password.clone();
            task::spawn_blocking(move || hasher.verify(&password, &user.password_hash)).await??
        }
        None => false,
    };

    let view_data = if verified {
        info!("User {} signed in", form.username);
        ViewData::with_message(format!("Welcome back, {}.", form.username))
    } else {
        warn!("Failed sign-in attempt for username: {}", form.username);
        ViewData::with_errors(vec!["Invalid username or password.".to_string()])
    };

    render(&state.templates, ACCOUNT_LOGIN, &form, &view_data)
}
