use async_trait::async_trait;

use super::CollectionId;
use crate::errors::ServiceError;

/// Narrow read access to a persistence backend: how many records a collection
/// holds, and a window of them in the backend's natural order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Send;

    async fn count(&self, collection: &CollectionId) -> Result<u64, ServiceError>;

    /// Up to `limit` records starting at `offset`; empty when `offset` is past the end.
    async fn slice(&self, collection: &CollectionId, limit: u64, offset: u64) -> Result<Vec<Self::Record>, ServiceError>;
}

/// In-memory store for tests; records keep insertion order.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryRecordStore<T> {
        collections: Mutex<HashMap<CollectionId, Vec<T>>>,
        calls: AtomicUsize,
        slices: Mutex<Vec<(u64, u64)>>, // (limit, offset) per slice call
    }

    impl<T: Clone + Send + Sync> MemoryRecordStore<T> {
        pub fn new() -> Self {
            Self { collections: Mutex::new(HashMap::new()), calls: AtomicUsize::new(0), slices: Mutex::new(Vec::new()) }
        }

        pub fn with_records(self, collection: CollectionId, records: Vec<T>) -> Self {
            self.collections.lock().unwrap().insert(collection, records);
            self
        }

        pub fn push(&self, collection: &CollectionId, record: T) {
            self.collections.lock().unwrap().entry(collection.clone()).or_default().push(record);
        }

        /// Total number of `count` + `slice` calls received.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        pub fn last_slice(&self) -> Option<(u64, u64)> { self.slices.lock().unwrap().last().copied() }
    }

    #[async_trait]
    impl<T: Clone + Send + Sync> RecordStore for MemoryRecordStore<T> {
        type Record = T;

        async fn count(&self, collection: &CollectionId) -> Result<u64, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let collections = self.collections.lock().unwrap();
            let records = collections
                .get(collection)
                .ok_or_else(|| ServiceError::NotFound(format!("collection {collection} not found")))?;
            Ok(records.len() as u64)
        }

        async fn slice(&self, collection: &CollectionId, limit: u64, offset: u64) -> Result<Vec<T>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.slices.lock().unwrap().push((limit, offset));
            let collections = self.collections.lock().unwrap();
            let records = collections
                .get(collection)
                .ok_or_else(|| ServiceError::NotFound(format!("collection {collection} not found")))?;
            let skip = usize::try_from(offset).unwrap_or(usize::MAX);
            let take = usize::try_from(limit).unwrap_or(usize::MAX);
            Ok(records.iter().skip(skip).take(take).cloned().collect())
        }
    }
}
