use axum::{extract::State, response::Html};
use tracing::{debug, instrument, trace};

use crate::context::DataContext;
use crate::error::AppError;
use crate::pages::{render, ViewData, ARTICLE_LIST};
use crate::schemas::AppState;
use crate::view_models::ArticleRow;

/// List every stored article
#[instrument(skip(state, ctx))]
pub async fn list_articles(
    State(state): State<AppState>,
    ctx: DataContext,
) -> Result<Html<String>, AppError> {
    trace!("Entering list_articles function");

    let rows: Vec<ArticleRow> = ctx
        .articles()
        .to_list()
        .await?
        .into_iter()
        .map(ArticleRow::from)
        .collect();
    debug!("Retrieved {} articles from database", rows.len());

    render(&state.templates, ARTICLE_LIST, &rows, &ViewData::default())
}
