/// Response cache for query results
///
/// An explicit, injectable store keyed by operation name plus the
/// serialized variables, with manual invalidation as the refetch
/// entry point. No global singletons: the application owns exactly
/// one instance and threads it through wherever queries resolve.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    operation: String,
    variables: String,
}

impl CacheKey {
    fn new(operation: &str, variables: &Value) -> Self {
        CacheKey {
            operation: operation.to_string(),
            // serde_json object keys are ordered, so equal variable
            // sets serialize identically
            variables: variables.to_string(),
        }
    }
}

/// Cached `data` payloads keyed by (operation, variables)
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: HashMap<CacheKey, Value>,
}

impl ResponseCache {
    pub fn store(&mut self, operation: &str, variables: &Value, data: Value) {
        self.entries.insert(CacheKey::new(operation, variables), data);
    }

    pub fn lookup(&self, operation: &str, variables: &Value) -> Option<&Value> {
        self.entries.get(&CacheKey::new(operation, variables))
    }

    /// Drop one entry; the next lookup misses and triggers a fetch
    pub fn invalidate(&mut self, operation: &str, variables: &Value) {
        self.entries.remove(&CacheKey::new(operation, variables));
    }

    /// Drop every entry for an operation, regardless of variables.
    /// Used after mutations, where any variable combination may now
    /// be stale.
    pub fn invalidate_operation(&mut self, operation: &str) {
        self.entries.retain(|key, _| key.operation != operation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
