use axum::{extract::State, response::Html, Form};
use chrono::Utc;
use tracing::{debug, info, instrument, trace};
use validator::Validate;

use crate::context::DataContext;
use crate::error::AppError;
use crate::pages::{error_messages, render, ViewData, ARTICLE_ADD};
use crate::schemas::AppState;
use crate::view_models::AddArticleViewModel;

/// Show an empty add-article form
#[instrument(skip(state))]
pub async fn show_add_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    trace!("Entering show_add_form function");
    render(
        &state.templates,
        ARTICLE_ADD,
        &AddArticleViewModel::default(),
        &ViewData::default(),
    )
}

/// Create an article from the submitted form
#[instrument(skip(state, ctx))]
pub async fn add_article(
    State(state): State<AppState>,
    ctx: DataContext,
    Form(mut form): Form<AddArticleViewModel>,
) -> Result<Html<String>, AppError> {
    trace!("Entering add_article function");

    if let Err(errors) = form.validate() {
        debug!("Add article form rejected: {}", errors);
        return render(
            &state.templates,
            ARTICLE_ADD,
            &form,
            &ViewData::with_errors(error_messages(&errors)),
        );
    }

    let created_at = Utc::now();
    let article = ctx.articles().add(form.to_new_article(created_at)).await?;
    ctx.save().await?;
    info!("Article created with ID: {}, title: {}", article.id, article.title);

    form.clear();
    render(
        &state.templates,
        ARTICLE_ADD,
        &form,
        &ViewData::with_message("Article created successfully."),
    )
}
