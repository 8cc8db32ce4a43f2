use std::sync::Arc;

use models::{Department, Employee, EntityId};
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// A record the store can own: it has an identity the store assigns.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> EntityId;
    fn with_id(self, id: EntityId) -> Self;
    /// Record kind for error messages, e.g. "department".
    fn kind() -> &'static str;
}

impl Entity for Department {
    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn kind() -> &'static str {
        "department"
    }
}

impl Entity for Employee {
    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn kind() -> &'static str {
        "employee"
    }
}

struct StoreInner<T> {
    records: Vec<T>,
    next_id: EntityId,
}

/// Generic insertion-ordered in-memory record store.
///
/// Holds every record of one entity type for the life of the process.
/// Records are append-only: no update, no delete, ids are never reused.
/// The id counter lives under the same lock as the records, so id
/// assignment and append are one critical section.
///
/// Reads hand out clones taken under the read lock; two consecutive
/// calls may observe different global state if a writer ran in between.
pub struct EntityStore<T> {
    inner: RwLock<StoreInner<T>>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(StoreInner { records: Vec::new(), next_id: 1 }) })
    }

    /// Assign the next id to `record`, append it, and return the stored
    /// form. Always succeeds.
    pub async fn add(&self, record: T) -> T {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let stored = record.with_id(id);
        inner.records.push(stored.clone());
        stored
    }

    /// All records in insertion order, as of the instant of the call.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.records.clone()
    }

    /// First record whose id matches, or `NotFound`.
    pub async fn find_by_id(&self, id: EntityId) -> Result<T, ServiceError> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("{} {}", T::kind(), id)))
    }

    /// Every record whose extracted key equals `key`, in insertion
    /// order. An empty result is not an error.
    pub async fn find_by_key<K, F>(&self, key: K, extract: F) -> Vec<T>
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        self.inner
            .read()
            .await
            .records
            .iter()
            .filter(|r| extract(r) == key)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
