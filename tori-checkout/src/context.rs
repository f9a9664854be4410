use std::collections::HashSet;

/// Per-request diagnostic context, one per platform callback.
///
/// Some degradation paths would otherwise log on every line item of
/// every totals pass; handlers key their diagnostics through this set
/// so each fires at most once per request.
#[derive(Debug, Default)]
pub struct RequestContext {
    logged: HashSet<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `key` is seen during this request.
    pub fn log_once(&mut self, key: &str) -> bool {
        self.logged.insert(key.to_string())
    }
}
