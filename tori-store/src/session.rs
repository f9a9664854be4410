use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// The host platform's per-customer session store. Request-scoped; the
/// host serializes access, so no ordering guarantees are needed here.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: String);

    /// Remove the key, returning the prior value if one was set.
    async fn clear(&self, key: &str) -> Option<String>;
}

/// In-memory session backing, one instance per simulated customer session.
pub struct InMemorySession {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySession {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        debug!(key, value = %value, "session set");
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    async fn clear(&self, key: &str) -> Option<String> {
        let prior = self.values.lock().unwrap().remove(key);
        if prior.is_some() {
            debug!(key, "session cleared");
        }
        prior
    }
}
