use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tori_catalog::ListingId;

/// Numeric custom-field accessor for platform records. Unset fields and
/// unavailable backends both read as `None`.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    async fn get(&self, record: ListingId, field: &str) -> Option<f64>;
}

/// In-memory attribute backing keyed by record id and field name.
pub struct InMemoryAttributes {
    values: Mutex<HashMap<(ListingId, String), f64>>,
}

impl InMemoryAttributes {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }

    pub fn put(&self, record: ListingId, field: &str, value: f64) {
        self.values
            .lock()
            .unwrap()
            .insert((record, field.to_string()), value);
    }
}

impl Default for InMemoryAttributes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttributeStore for InMemoryAttributes {
    async fn get(&self, record: ListingId, field: &str) -> Option<f64> {
        self.values
            .lock()
            .unwrap()
            .get(&(record, field.to_string()))
            .copied()
    }
}
