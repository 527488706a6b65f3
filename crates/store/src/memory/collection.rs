use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::RwLock;

/// An entity that can be stored in a [`Collection`].
pub(crate) trait Stored: Clone + Send + Sync {
    type Id: Copy + PartialEq + Display + Send + Sync;

    /// Entity name used in log records.
    const KIND: &'static str;

    fn key(&self) -> Self::Id;
}

/// An insertion-ordered list of entities behind a single writer lock.
///
/// Clones share the same underlying storage.
pub(crate) struct Collection<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Stored> Collection<T> {
    pub(crate) async fn get(&self, id: T::Id) -> Option<T> {
        let items = self.items.read().await;
        items.iter().find(|item| item.key() == id).cloned()
    }

    pub(crate) async fn all(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub(crate) async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.items.read().await;
        items.iter().filter(|item| predicate(item)).cloned().collect()
    }

    /// Appends the entity unless its id is already present.
    pub(crate) async fn insert(&self, item: T) {
        let mut items = self.items.write().await;
        let id = item.key();
        if items.iter().any(|existing| existing.key() == id) {
            tracing::debug!(kind = T::KIND, %id, "add ignored, id already stored");
            return;
        }
        items.push(item);
    }

    /// Replaces the entity with the same id in place.
    ///
    /// Absent ids are ignored without error.
    pub(crate) async fn replace(&self, item: T) {
        let mut items = self.items.write().await;
        let id = item.key();
        match items.iter_mut().find(|existing| existing.key() == id) {
            Some(slot) => *slot = item,
            None => tracing::debug!(kind = T::KIND, %id, "update ignored, id not stored"),
        }
    }

    pub(crate) async fn remove(&self, id: T::Id) {
        let mut items = self.items.write().await;
        match items.iter().position(|existing| existing.key() == id) {
            Some(index) => {
                items.remove(index);
            }
            None => tracing::debug!(kind = T::KIND, %id, "delete ignored, id not stored"),
        }
    }

    pub(crate) async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub(crate) async fn clear(&self) {
        self.items.write().await.clear();
    }
}
