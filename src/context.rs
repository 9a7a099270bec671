//! Per-request persistence context.
//!
//! A [`DataContext`] wraps one database transaction. Handlers receive it as an
//! extractor, read and stage changes through the named collections, and call
//! [`DataContext::save`] to commit. A context dropped without `save` rolls
//! every staged change back.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use model::entities::{article, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::error::AppError;
use crate::schemas::AppState;

/// Unit of work scoped to a single request.
#[derive(Debug)]
pub struct DataContext {
    txn: DatabaseTransaction,
}

impl DataContext {
    /// Opens a new context on `db`.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        trace!("Beginning data context transaction");
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// The `articles` collection.
    pub fn articles(&self) -> Articles<'_> {
        Articles { conn: &self.txn }
    }

    /// The `users` collection.
    pub fn users(&self) -> Users<'_> {
        Users { conn: &self.txn }
    }

    /// Commits every pending add, update and remove.
    pub async fn save(self) -> Result<(), DbErr> {
        trace!("Committing data context transaction");
        self.txn.commit().await?;
        debug!("Data context changes saved");
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for DataContext {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(DataContext::begin(&state.db).await?)
    }
}

/// Article rows visible through a [`DataContext`].
pub struct Articles<'a> {
    conn: &'a DatabaseTransaction,
}

impl Articles<'_> {
    pub async fn find(&self, id: Uuid) -> Result<Option<article::Model>, DbErr> {
        article::Entity::find_by_id(id).one(self.conn).await
    }

    /// Every article, oldest first.
    pub async fn to_list(&self) -> Result<Vec<article::Model>, DbErr> {
        article::Entity::find()
            .order_by_asc(article::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn add(&self, article: article::ActiveModel) -> Result<article::Model, DbErr> {
        article.insert(self.conn).await
    }

    pub async fn update(&self, article: article::ActiveModel) -> Result<article::Model, DbErr> {
        article.update(self.conn).await
    }

    pub async fn remove(&self, article: article::Model) -> Result<(), DbErr> {
        article.delete(self.conn).await?;
        Ok(())
    }
}

/// User rows visible through a [`DataContext`].
pub struct Users<'a> {
    conn: &'a DatabaseTransaction,
}

impl Users<'_> {
    pub async fn find(&self, id: i32) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn)
            .await
    }

    pub async fn add(&self, user: user::ActiveModel) -> Result<user::Model, DbErr> {
        user.insert(self.conn).await
    }

    /// Like [`Users::add`], but `None` when the unique username index rejects the row.
    pub async fn try_add(&self, user: user::ActiveModel) -> Result<Option<user::Model>, DbErr> {
        match self.add(user).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!("User insert rejected by unique index: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn remove(&self, user: user::Model) -> Result<(), DbErr> {
        user.delete(self.conn).await?;
        Ok(())
    }
}
