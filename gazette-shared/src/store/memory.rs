/// In-memory document store
///
/// A `DocumentStore` over plain maps behind a `tokio::sync::RwLock`.
/// It exists for two reasons:
///
/// - Testing the API and access-control stack without a running Postgres
/// - Local demos where persistence does not matter
///
/// Semantics mirror the Postgres backend: ids assigned on first store,
/// `created` set once, `modified` refreshed every store, last write wins.
/// `sync_views` is a no-op because the listing queries sort in place.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, StoreError};
use crate::models::{Article, ArticleInput, User};

#[derive(Default)]
struct Collections {
    /// Keyed by username; BTreeMap keeps the username listing ordered
    users: BTreeMap<String, User>,

    /// Keyed by article id
    articles: HashMap<Uuid, Article>,
}

/// Document store held entirely in process memory
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Collections>,
}

impl MemStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemStore {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(username).cloned())
    }

    async fn put_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn usernames(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.keys().cloned().collect())
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.articles.get(&id).cloned())
    }

    async fn put_article(&self, input: ArticleInput) -> Result<Article, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let created = inner.articles.get(&id).map(|a| a.created).unwrap_or(now);

        let article = Article {
            id,
            username: input.username,
            title: input.title,
            body: input.body,
            created,
            modified: now,
        };

        inner.articles.insert(id, article.clone());
        Ok(article)
    }

    async fn delete_article(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        match inner.articles.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn articles_by_created(&self) -> Result<Vec<Article>, StoreError> {
        let inner = self.inner.read().await;
        let mut articles: Vec<Article> = inner.articles.values().cloned().collect();
        articles.sort_by(|a, b| b.created.cmp(&a.created).then(b.modified.cmp(&a.modified)));
        Ok(articles)
    }

    async fn articles_by_owner(&self, username: &str) -> Result<Vec<Article>, StoreError> {
        let inner = self.inner.read().await;
        let mut articles: Vec<Article> = inner
            .articles
            .values()
            .filter(|a| a.username == username)
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.created.cmp(&a.created).then(b.modified.cmp(&a.modified)));
        Ok(articles)
    }

    async fn sync_views(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(username: &str, title: &str) -> ArticleInput {
        ArticleInput {
            id: None,
            username: username.to_string(),
            title: title.to_string(),
            body: format!("{} body", title),
        }
    }

    #[tokio::test]
    async fn test_put_article_assigns_id_and_timestamps() {
        let store = MemStore::new();

        let article = store
            .put_article(draft("alice", "first"))
            .await
            .expect("put should succeed");

        assert_eq!(article.username, "alice");
        assert_eq!(article.created, article.modified);

        let loaded = store
            .get_article(article.id)
            .await
            .expect("get should succeed")
            .expect("article should exist");
        assert_eq!(loaded, article);
    }

    #[tokio::test]
    async fn test_update_preserves_created_and_refreshes_modified() {
        let store = MemStore::new();
        let original = store
            .put_article(draft("alice", "first"))
            .await
            .expect("put should succeed");

        let updated = store
            .put_article(original.edited("renamed", "new body"))
            .await
            .expect("update should succeed");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created, original.created);
        assert!(updated.modified >= original.modified);
        assert_eq!(updated.title, "renamed");
    }

    #[tokio::test]
    async fn test_articles_by_created_newest_first() {
        let store = MemStore::new();
        let first = store
            .put_article(draft("alice", "first"))
            .await
            .expect("put should succeed");
        let second = store
            .put_article(draft("bob", "second"))
            .await
            .expect("put should succeed");

        let listing = store
            .articles_by_created()
            .await
            .expect("listing should succeed");

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, second.id);
        assert_eq!(listing[1].id, first.id);
    }

    #[tokio::test]
    async fn test_articles_by_owner_filters_and_orders() {
        let store = MemStore::new();
        let a1 = store
            .put_article(draft("alice", "a1"))
            .await
            .expect("put should succeed");
        store
            .put_article(draft("bob", "b1"))
            .await
            .expect("put should succeed");
        let a2 = store
            .put_article(draft("alice", "a2"))
            .await
            .expect("put should succeed");

        let alices = store
            .articles_by_owner("alice")
            .await
            .expect("listing should succeed");

        assert_eq!(alices.len(), 2);
        assert_eq!(alices[0].id, a2.id);
        assert_eq!(alices[1].id, a1.id);
        assert!(alices.iter().all(|a| a.username == "alice"));
    }

    #[tokio::test]
    async fn test_articles_by_owner_unknown_owner_is_empty() {
        let store = MemStore::new();

        let none = store
            .articles_by_owner("nobody")
            .await
            .expect("listing should succeed");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_delete_article() {
        let store = MemStore::new();
        let article = store
            .put_article(draft("alice", "doomed"))
            .await
            .expect("put should succeed");

        store
            .delete_article(article.id)
            .await
            .expect("delete should succeed");

        let gone = store
            .get_article(article.id)
            .await
            .expect("get should succeed");
        assert!(gone.is_none());

        let again = store.delete_article(article.id).await;
        assert!(matches!(again, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_usernames_reflect_registrations() {
        let store = MemStore::new();
        assert!(store.usernames().await.expect("should succeed").is_empty());

        for name in ["carol", "alice", "bob"] {
            let user = User::new(name, "pw").expect("user creation should succeed");
            store.put_user(user).await.expect("put should succeed");
        }

        let names = store.usernames().await.expect("should succeed");
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn test_put_user_overwrites_by_username() {
        let store = MemStore::new();
        let user = User::new("alice", "old").expect("user creation should succeed");
        store.put_user(user).await.expect("put should succeed");

        let replacement = User::new("alice", "new").expect("user creation should succeed");
        store.put_user(replacement).await.expect("put should succeed");

        let loaded = store
            .get_user("alice")
            .await
            .expect("get should succeed")
            .expect("user should exist");
        assert!(loaded.check_password("new").expect("verify should succeed"));
        assert!(!loaded.check_password("old").expect("verify should succeed"));

        assert_eq!(store.usernames().await.expect("should succeed").len(), 1);
    }
}
