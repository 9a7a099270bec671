//! Article pages: add, edit (load, update, delete) and list.

pub mod add;
pub mod edit;
pub mod list;
