//! SeaORM entities backing the article pages and the account pages.
//! `Article` and `User` are deliberately unrelated: an article's author is
//! free text, not a foreign key.

pub mod article;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::article::Entity as Article;
    pub use super::user::Entity as User;
}
