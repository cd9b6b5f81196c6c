use std::collections::HashMap;
use std::time::Duration;

use super::FlagStore;

/// HashMap-backed flag store for tests and native hosts.
/// TTLs are recorded but never enforced; a native host that needs real
/// expiry should persist to disk with timestamps instead.
#[derive(Debug, Default)]
pub struct MemoryStore {
    flags: HashMap<String, (String, Duration)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The TTL most recently recorded for a key, if present.
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.flags.get(key).map(|(_, ttl)| *ttl)
    }

    /// Number of stored flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the store holds no flags.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FlagStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.flags.get(key).map(|(value, _)| value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.flags.insert(key.to_string(), (value.to_string(), ttl));
    }

    fn get_all(&self, prefix: &str) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .flags
            .iter()
            .filter_map(|(key, (value, _))| {
                key.strip_prefix(prefix)
                    .map(|suffix| (suffix.to_string(), value.clone()))
            })
            .collect();
        // HashMap iteration order is arbitrary; keep enumeration stable.
        entries.sort();
        entries
    }

    fn remove(&mut self, key: &str) {
        self.flags.remove(key);
    }
}
