use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use crate::context::DataContext;
use crate::error::AppError;
use crate::pages::{render, ViewData, ARTICLE_EDIT};
use crate::schemas::{AppState, EditPolicy};
use crate::view_models::{EditArticleForm, EditArticleViewModel};

/// Load an article into the edit form.
///
/// An unknown or malformed id renders the page without a form.
#[instrument(skip(state, ctx))]
pub async fn show_edit_form(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ctx: DataContext,
) -> Result<Html<String>, AppError> {
    trace!("Entering show_edit_form function for id: {}", id);

    let model = match Uuid::parse_str(&id) {
        Ok(article_id) => ctx
            .articles()
            .find(article_id)
            .await?
            .map(EditArticleViewModel::from),
        Err(_) => {
            debug!("Edit page requested with malformed id: {}", id);
            None
        }
    };

    if model.is_none() {
        warn!("Article {} not found for edit", id);
    }

    render(&state.templates, ARTICLE_EDIT, &model, &ViewData::default())
}

/// Apply an edit submission.
///
/// A missing article is a silent no-op. When nothing changed, the configured
/// [`EditPolicy`] decides whether the values are written again.
#[instrument(skip(state, ctx))]
pub async fn update_article(
    State(state): State<AppState>,
    ctx: DataContext,
    Form(form): Form<EditArticleForm>,
) -> Result<Html<String>, AppError> {
    trace!("Entering update_article function");

    let submitted = match form.bind() {
        Ok(submitted) => submitted,
        Err(form) => {
            debug!("Edit submission with malformed id {} ignored", form.id);
            return render(&state.templates, ARTICLE_EDIT, &Some(form), &ViewData::default());
        }
    };

    let existing = ctx.articles().find(submitted.id).await?;
    let Some(article) = existing else {
        warn!("Article {} not found for update", submitted.id);
        return render(&state.templates, ARTICLE_EDIT, &Some(submitted), &ViewData::default());
    };

    if submitted.matches(&article) && state.edit_policy == EditPolicy::SkipUnchanged {
        debug!("Article {} unchanged, nothing to save", article.id);
        return render(
            &state.templates,
            ARTICLE_EDIT,
            &Some(EditArticleViewModel::from(article)),
            &ViewData::with_message("Values are the same"),
        );
    }

    let updated = ctx.articles().update(submitted.apply_to(article)).await?;
    ctx.save().await?;
    info!("Article {} updated, title: {}", updated.id, updated.title);

    let message = format!("Article {} updated successfully", updated.title);
    render(
        &state.templates,
        ARTICLE_EDIT,
        &Some(EditArticleViewModel::from(updated)),
        &ViewData::with_message(message),
    )
}

/// Delete the article named by the edit form and return to the list.
///
/// A missing article re-renders the edit page unchanged.
#[instrument(skip(state, ctx))]
pub async fn delete_article(
    State(state): State<AppState>,
    ctx: DataContext,
    Form(form): Form<EditArticleForm>,
) -> Result<Response, AppError> {
    trace!("Entering delete_article function");

    let submitted = match form.bind() {
        Ok(submitted) => submitted,
        Err(form) => {
            warn!("Delete submission with malformed id {} ignored", form.id);
            return Ok(render(&state.templates, ARTICLE_EDIT, &Some(form), &ViewData::default())?
                .into_response());
        }
    };

    let existing = ctx.articles().find(submitted.id).await?;
    if let Some(article) = existing {
        let id = article.id;
        ctx.articles().remove(article).await?;
        ctx.save().await?;
        info!("Article {} deleted", id);
        return Ok(Redirect::to("/articles/list").into_response());
    }

    warn!("Article {} not found for deletion", submitted.id);
    Ok(render(&state.templates, ARTICLE_EDIT, &Some(submitted), &ViewData::default())?.into_response())
}
