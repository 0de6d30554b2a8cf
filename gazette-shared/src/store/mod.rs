/// Document store adapter
///
/// All persistent state lives behind the [`DocumentStore`] trait: two
/// collections (`users`, keyed by username; `articles`, keyed by a
/// store-assigned UUID) plus the secondary indexes ("views") needed for the
/// listing endpoints.
///
/// # Store contract
///
/// Writes follow document-store semantics rather than row semantics:
/// `put_article` assigns an id when the input has none, sets `created`
/// exactly once on first store, and refreshes `modified` on every store.
/// `put_user` upserts by username.
///
/// # Views
///
/// The listing queries are backed by secondary indexes that must be synced
/// once at startup, before the server accepts traffic, via
/// [`DocumentStore::sync_views`]. A view whose persisted definition
/// signature differs from the compiled-in definition is dropped and
/// rebuilt; stale definitions must never silently serve wrong results.
///
/// # Concurrency
///
/// The store serializes per document with last-write-wins semantics. Two
/// concurrent updates to the same article can silently overwrite one
/// another; the adapter surfaces no optimistic-concurrency tokens and never
/// retries. This is a known, accepted gap for this service.

pub mod memory;
pub mod pg;
pub mod views;

pub use memory::MemStore;
pub use pg::PgStore;

use async_trait::async_trait;

use crate::models::{Article, ArticleInput, User};
use uuid::Uuid;

/// Error type for document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document with the requested id
    #[error("Document not found")]
    NotFound,

    /// A concurrent write collided (only raised by backends that detect it)
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A document body failed to (de)serialize
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document could not be decoded (bad id or body shape)
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Typed access to the two collections and their views
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Looks up a user by username. `Ok(None)` if absent.
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Stores a user, overwriting any existing document for that username.
    async fn put_user(&self, user: User) -> Result<User, StoreError>;

    /// All registered usernames, via the users-by-username view.
    ///
    /// Reflects every committed registration at query time; no snapshot
    /// isolation is promised.
    async fn usernames(&self) -> Result<Vec<String>, StoreError>;

    /// Looks up an article by id. `Ok(None)` if absent.
    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, StoreError>;

    /// Stores an article.
    ///
    /// Assigns an id when `input.id` is `None`; sets `created` only on
    /// first store; refreshes `modified` every time. Returns the stored
    /// representation.
    async fn put_article(&self, input: ArticleInput) -> Result<Article, StoreError>;

    /// Deletes an article. `StoreError::NotFound` if the id is unknown.
    async fn delete_article(&self, id: Uuid) -> Result<(), StoreError>;

    /// All articles, newest `created` first.
    async fn articles_by_created(&self) -> Result<Vec<Article>, StoreError>;

    /// One owner's articles, newest `created` first.
    ///
    /// Empty for an unknown owner or an owner with no articles, never an
    /// error.
    async fn articles_by_owner(&self, username: &str) -> Result<Vec<Article>, StoreError>;

    /// Synchronizes the view definitions with the backing store.
    ///
    /// Must run to completion before the server starts handling requests;
    /// a failure here aborts startup.
    async fn sync_views(&self) -> Result<(), StoreError>;
}
