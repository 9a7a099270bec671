//! Form-shaped records and their mappings to and from the entities.
//!
//! Form structs use `#[serde(default)]` so that a missing field binds as empty
//! and is reported by validation instead of rejecting the whole request.

use std::fmt;

use chrono::{DateTime, Utc};
use model::entities::{article, user};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Fields of the add-article form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct AddArticleViewModel {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub author: Option<String>,
}

impl AddArticleViewModel {
    /// A new article with a fresh id, stamped with `created_at`.
    pub fn to_new_article(&self, created_at: DateTime<Utc>) -> article::ActiveModel {
        article::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(self.title.clone()),
            description: Set(self.description.clone()),
            author: Set(non_blank(self.author.as_deref())),
            created_at: Set(created_at),
        }
    }

    /// Reset the form after a successful submission.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Raw fields posted by the edit page, before the id has been checked.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EditArticleForm {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl EditArticleForm {
    /// Map onto a typed view model. When `id` is not a UUID the form is
    /// returned unchanged so the page can show what was submitted.
    pub fn bind(self) -> Result<EditArticleViewModel, Self> {
        match Uuid::parse_str(self.id.trim()) {
            Ok(id) => Ok(EditArticleViewModel {
                id,
                title: self.title,
                description: self.description,
                author: None,
                created_at: None,
            }),
            Err(_) => Err(self),
        }
    }
}

/// What the edit page shows. Author and creation time are read-only and only
/// present when the model was loaded from a stored article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditArticleViewModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl EditArticleViewModel {
    /// True when title and description already equal the stored values.
    pub fn matches(&self, article: &article::Model) -> bool {
        article.title == self.title && article.description == self.description
    }

    /// Copy the editable fields onto `article`. Author and `created_at` are kept.
    pub fn apply_to(&self, article: article::Model) -> article::ActiveModel {
        let mut active: article::ActiveModel = article.into();
        active.title = Set(self.title.clone());
        active.description = Set(self.description.clone());
        active
    }
}

impl From<article::Model> for EditArticleViewModel {
    fn from(model: article::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            author: model.author,
            created_at: Some(model.created_at),
        }
    }
}

/// One row of the article list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<article::Model> for ArticleRow {
    fn from(model: article::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            author: model.author,
            created_at: model.created_at,
        }
    }
}

/// Fields of the registration form. The password is never serialized back
/// into a page.
#[derive(Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct RegistrationViewModel {
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl RegistrationViewModel {
    pub fn to_new_user(&self, password_hash: String) -> user::ActiveModel {
        user::ActiveModel {
            username: Set(self.username.clone()),
            password_hash: Set(password_hash),
            ..Default::default()
        }
    }
}

impl fmt::Debug for RegistrationViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationViewModel")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fields of the login form.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginViewModel {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for LoginViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginViewModel")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
