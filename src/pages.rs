//! Server-rendered pages.
//!
//! Templates are compiled into the binary and loaded once at start-up. Every
//! page receives two values: `model`, the page's view model, and `view_data`,
//! the per-request bag carrying the status message and validation errors.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::trace;
use validator::ValidationErrors;

use crate::error::AppError;

pub const ARTICLE_LIST: &str = "articles/list.html";
pub const ARTICLE_ADD: &str = "articles/add.html";
pub const ARTICLE_EDIT: &str = "articles/edit.html";
pub const ACCOUNT_REGISTER: &str = "account/register.html";
pub const ACCOUNT_LOGIN: &str = "account/login.html";

/// Compile every page template.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("layout.html", include_str!("../templates/layout.html")),
        (ARTICLE_LIST, include_str!("../templates/articles/list.html")),
        (ARTICLE_ADD, include_str!("../templates/articles/add.html")),
        (ARTICLE_EDIT, include_str!("../templates/articles/edit.html")),
        (ACCOUNT_REGISTER, include_str!("../templates/account/register.html")),
        (ACCOUNT_LOGIN, include_str!("../templates/account/login.html")),
    ])?;
    Ok(tera)
}

/// Per-request values shown next to the page model.
#[derive(Debug, Default, Serialize)]
pub struct ViewData {
    /// Status line, set only on success paths.
    pub message: Option<String>,
    pub errors: Vec<String>,
}

impl ViewData {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(errors: Vec<String>) -> Self {
        Self {
            message: None,
            errors,
        }
    }
}

/// Flatten validator output into display strings, ordered by field name.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

/// Render `template` with the given page model and view data.
pub fn render<M: Serialize>(
    templates: &Tera,
    template: &str,
    model: &M,
    view_data: &ViewData,
) -> Result<Html<String>, AppError> {
    trace!("Rendering template {}", template);
    let mut context = Context::new();
    context.insert("model", model);
    context.insert("view_data", view_data);
    Ok(Html(templates.render(template, &context)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_models::{AddArticleViewModel, ArticleRow, EditArticleForm, EditArticleViewModel};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;
    use validator::Validate;

    #[test]
    fn test_all_templates_compile() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();

        for name in [ARTICLE_LIST, ARTICLE_ADD, ARTICLE_EDIT, ACCOUNT_REGISTER, ACCOUNT_LOGIN] {
            assert!(names.contains(&name), "missing template {}", name);
        }
    }

    #[test]
    fn test_message_and_model_are_rendered_escaped() {
        let tera = load_templates().unwrap();
        let model = AddArticleViewModel {
            title: "<script>alert(1)</script>".to_string(),
            description: String::new(),
            author: None,
        };

        let html = render(&tera, ARTICLE_ADD, &model, &ViewData::with_message("Saved & done")).unwrap();

        assert!(html.0.contains("Saved &amp; done"));
        assert!(html.0.contains("&lt;script&gt;"));
        assert!(!html.0.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_list_renders_rows() {
        let tera = load_templates().unwrap();
        let rows = vec![ArticleRow {
            id: Uuid::nil(),
            title: "Hello".to_string(),
            description: "World".to_string(),
            author: Some("Ada".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }];

        let html = render(&tera, ARTICLE_LIST, &rows, &ViewData::default()).unwrap().0;

        assert!(html.contains("Hello"));
        assert!(html.contains("Ada"));
        assert!(html.contains("2024-05-01 12:30"));
        assert!(html.contains(&format!("/articles/edit/{}", Uuid::nil())));
    }

    #[test]
    fn test_edit_page_without_model_renders_empty() {
        let tera = load_templates().unwrap();

        let html = render(&tera, ARTICLE_EDIT, &None::<EditArticleViewModel>, &ViewData::default())
            .unwrap()
            .0;

        assert!(!html.contains("name=\"title\""));
    }

    #[test]
    fn test_edit_page_renders_unbound_form() {
        let tera = load_templates().unwrap();
        let form = EditArticleForm {
            id: "nonexistent".to_string(),
            title: "Submitted title".to_string(),
            description: "Submitted description".to_string(),
        };

        let html = render(&tera, ARTICLE_EDIT, &Some(form), &ViewData::default())
            .unwrap()
            .0;

        assert!(html.contains("name=\"id\" value=\"nonexistent\""));
        assert!(html.contains("value=\"Submitted title\""));
        assert!(html.contains("Submitted description"));
        assert!(!html.contains("Author:"));
        assert!(!html.contains("Created:"));
    }

    #[test]
    fn test_error_messages_use_field_messages() {
        let model = AddArticleViewModel::default();
        let errors = model.validate().unwrap_err();

        assert_eq!(error_messages(&errors), vec!["Title is required".to_string()]);
    }
}
