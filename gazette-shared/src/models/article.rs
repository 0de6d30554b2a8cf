/// Article model
///
/// Articles are the mutable, owner-scoped resource of the API. The store
/// assigns the id and maintains the timestamps: `created` is set exactly
/// once when the document is first stored, `modified` is refreshed on every
/// store.
///
/// Ownership is the `username` field, fixed at creation to the principal
/// that created the article. Handlers never accept a client-supplied owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored article, as returned from the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Store-assigned unique id
    pub id: Uuid,

    /// Owning username, immutable after creation
    pub username: String,

    /// Article title
    pub title: String,

    /// Article body
    pub body: String,

    /// Set once on first store
    pub created: DateTime<Utc>,

    /// Refreshed on every store
    pub modified: DateTime<Utc>,
}

/// Input for storing an article
///
/// `id: None` creates a new article; `id: Some(..)` overwrites the existing
/// document while preserving its `created` timestamp.
#[derive(Debug, Clone)]
pub struct ArticleInput {
    /// Existing id for updates, `None` for creates
    pub id: Option<Uuid>,

    /// Owning username
    pub username: String,

    /// Article title
    pub title: String,

    /// Article body
    pub body: String,
}

impl Article {
    /// Produces the update input for this article with new content.
    ///
    /// Owner and id are carried over unchanged, so a handler cannot
    /// accidentally reassign ownership while editing.
    pub fn edited(&self, title: impl Into<String>, body: impl Into<String>) -> ArticleInput {
        ArticleInput {
            id: Some(self.id),
            username: self.username.clone(),
            title: title.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edited_preserves_id_and_owner() {
        let article = Article {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            title: "old title".to_string(),
            body: "old body".to_string(),
            created: Utc::now(),
            modified: Utc::now(),
        };

        let input = article.edited("new title", "new body");

        assert_eq!(input.id, Some(article.id));
        assert_eq!(input.username, "alice");
        assert_eq!(input.title, "new title");
        assert_eq!(input.body, "new body");
    }
}
