//! In-memory summary cache.
//!
//! One entry per folder. An entry is served only while it is younger than
//! the TTL and its fingerprint matches the folder's current listing, so a
//! newly modified file invalidates the cached summary immediately.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::types::summary::SummaryPayload;

/// A cached summary for one folder.
#[derive(Debug, Clone)]
pub struct SummaryCacheEntry {
    pub folder_id: String,
    pub expires_at: Instant,

    /// Listing fingerprint the payload was built from
    pub fingerprint: String,
    pub payload: Arc<SummaryPayload>,
}

impl SummaryCacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Folder ID → latest summary.
///
/// Concurrent requests for the same folder may both miss and both compute;
/// the last `put` wins.
pub struct SummaryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, SummaryCacheEntry>>,
}

impl SummaryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached payload if it is fresh and built from `fingerprint`.
    pub async fn get(&self, folder_id: &str, fingerprint: &str) -> Option<Arc<SummaryPayload>> {
        let entries = self.entries.read().await;
        let entry = entries.get(folder_id)?;

        if !entry.is_fresh(Instant::now()) {
            debug!(folder_id = %folder_id, "Cached summary expired");
            return None;
        }
        if entry.fingerprint != fingerprint {
            debug!(folder_id = %folder_id, "Cached summary is stale for current listing");
            return None;
        }

        Some(entry.payload.clone())
    }

    /// Store a payload, replacing any previous entry for the folder.
    pub async fn put(&self, folder_id: &str, fingerprint: &str, payload: Arc<SummaryPayload>) {
        let entry = SummaryCacheEntry {
            folder_id: folder_id.to_string(),
            expires_at: Instant::now() + self.ttl,
            fingerprint: fingerprint.to_string(),
            payload,
        };
        self.entries
            .write()
            .await
            .insert(folder_id.to_string(), entry);
    }

    /// Number of folders with an entry (fresh or not).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::summary::SummaryCounts;

    fn payload(total_files: usize) -> Arc<SummaryPayload> {
        Arc::new(SummaryPayload {
            documents: vec![],
            rfi: vec![],
            rfq: vec![],
            counts: SummaryCounts {
                total_files,
                ..Default::default()
            },
        })
    }

    #[tokio::test]
    async fn test_put_then_get_returns_same_payload() {
        let cache = SummaryCache::new(Duration::from_secs(600));
        let stored = payload(3);
        cache.put("folder", "2025-01-01T00:00:00.000Z", stored.clone()).await;

        let hit = cache.get("folder", "2025-01-01T00:00:00.000Z").await.unwrap();
        assert!(Arc::ptr_eq(&hit, &stored));
    }

    #[tokio::test]
    async fn test_fingerprint_mismatch_misses() {
        let cache = SummaryCache::new(Duration::from_secs(600));
        cache.put("folder", "a", payload(1)).await;

        assert!(cache.get("folder", "b").await.is_none());
        assert!(cache.get("other", "a").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = SummaryCache::new(Duration::from_secs(600));
        cache.put("folder", "fp", payload(1)).await;

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(cache.get("folder", "fp").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("folder", "fp").await.is_none());
        // Expired entries stay until overwritten
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_replaces_entry() {
        let cache = SummaryCache::new(Duration::from_secs(600));
        cache.put("folder", "old", payload(1)).await;
        cache.put("folder", "new", payload(2)).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get("folder", "old").await.is_none());
        assert_eq!(cache.get("folder", "new").await.unwrap().counts.total_files, 2);
    }
}
