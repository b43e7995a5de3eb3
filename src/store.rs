//! In-memory article store
//!
//! [`ArticleStore`] owns every article for the lifetime of the process. A
//! single mutex guards the map for reads and writes alike, and every read
//! hands back clones, so no caller ever holds a reference into the map.
//!
//! # Example
//!
//! ```
//! use articles_rs::ArticleStore;
//! use articles_rs::article::NewArticle;
//!
//! let store = ArticleStore::new();
//! let id = store.next_id();
//! let article = NewArticle {
//!     title: "Hello world".to_string(),
//!     ..NewArticle::default()
//! }
//! .into_article(id.clone());
//!
//! store.insert(article.clone());
//! assert_eq!(store.get_by_id(&id), Some(article));
//! assert_eq!(store.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::article::{Article, IdGenerator};

/// Mutex-guarded map from article id to article
#[derive(Debug, Default)]
pub struct ArticleStore {
    articles: Mutex<HashMap<String, Article>>,
    ids: IdGenerator,
}

impl ArticleStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given articles, keyed by their ids
    #[must_use]
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let store = Self::new();
        {
            let mut map = store.lock();
            for article in articles {
                map.insert(article.id.clone(), article);
            }
        }
        store
    }

    // Every operation leaves the map consistent before it can panic, so a
    // poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Article>> {
        self.articles.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Issue a fresh article id
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Store an article under its id
    ///
    /// An article already stored under the same id is replaced and returned.
    pub fn insert(&self, article: Article) -> Option<Article> {
        self.lock().insert(article.id.clone(), article)
    }

    /// Snapshot of every stored article, in no particular order
    #[must_use]
    pub fn get_all(&self) -> Vec<Article> {
        self.lock().values().cloned().collect()
    }

    /// Copy of the article stored under `id`
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Article> {
        self.lock().get(id).cloned()
    }

    /// Number of stored articles
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no articles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
