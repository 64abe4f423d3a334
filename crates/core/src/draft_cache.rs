use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

/// In-memory draft store for crash/navigation recovery.
///
/// The editor writes its working copy here keyed by config id; on mount it
/// reads the draft back and offers recovery. Entries expire after a fixed
/// TTL so a week-old abandoned draft doesn't shadow the persisted document.
/// Injected explicitly into the editor rather than reached as an ambient
/// global, so recovery flows are testable.
#[derive(Debug)]
pub struct DraftCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

#[derive(Debug)]
struct Entry {
    value: Value,
    stored_at: Instant,
}

impl DraftCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn put(&self, key: &str, value: Value) {
        let mut entries = self.entries.lock().expect("draft cache lock poisoned");
        entries.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Fetch a draft if present and not expired. Expired entries are
    /// removed on read.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().expect("draft cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Drop a draft, e.g. after a successful save or an explicit discard.
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().expect("draft cache lock poisoned");
        entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn draft_round_trips_within_ttl() {
        let cache = DraftCache::new(Duration::from_secs(60));
        cache.put("cfg1", json!({ "sections": [] }));
        assert_eq!(cache.get("cfg1"), Some(json!({ "sections": [] })));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_draft_reads_as_absent() {
        let cache = DraftCache::new(Duration::from_secs(60));
        cache.put("cfg1", json!({ "name": "stale" }));
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(cache.get("cfg1"), None);
        // And the expired entry was evicted, not just hidden.
        assert_eq!(cache.get("cfg1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_discards_the_draft() {
        let cache = DraftCache::new(Duration::from_secs(60));
        cache.put("cfg1", json!(1));
        cache.invalidate("cfg1");
        assert_eq!(cache.get("cfg1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn put_refreshes_the_clock() {
        let cache = DraftCache::new(Duration::from_secs(60));
        cache.put("cfg1", json!(1));
        tokio::time::sleep(Duration::from_secs(40)).await;
        cache.put("cfg1", json!(2));
        tokio::time::sleep(Duration::from_secs(40)).await;
        assert_eq!(cache.get("cfg1"), Some(json!(2)));
    }
}
