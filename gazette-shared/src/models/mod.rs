/// Entity models
///
/// This module contains the data structures stored in the document store:
///
/// - `user`: User accounts with hashed credentials
/// - `article`: Articles with ownership and timestamps

pub mod article;
pub mod user;

pub use article::{Article, ArticleInput};
pub use user::User;
