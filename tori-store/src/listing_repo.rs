use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tori_catalog::{ListingHead, ListingId, ListingRecord};

/// Record lookup against the platform's content store. Only the
/// kind/status head is needed to validate a session pointer.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn head(&self, id: ListingId) -> Option<ListingHead>;
}

/// In-memory record backing for tests and local runs.
pub struct InMemoryListings {
    records: Mutex<HashMap<ListingId, ListingRecord>>,
}

impl InMemoryListings {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, record: ListingRecord) {
        self.records.lock().unwrap().insert(record.id, record);
    }

    pub fn get(&self, id: ListingId) -> Option<ListingRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    /// Apply a mutation to a stored record, if present.
    pub fn update<F: FnOnce(&mut ListingRecord)>(&self, id: ListingId, f: F) {
        if let Some(record) = self.records.lock().unwrap().get_mut(&id) {
            f(record);
        }
    }
}

impl Default for InMemoryListings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingStore for InMemoryListings {
    async fn head(&self, id: ListingId) -> Option<ListingHead> {
        self.records.lock().unwrap().get(&id).map(|r| r.head())
    }
}
