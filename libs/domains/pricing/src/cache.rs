//! Concurrency-safe TTL cache for resolved price quotations.
//!
//! Shared by all in-flight provider tasks. Entries are never mutated in
//! place, only replaced or expired; an expired entry is treated as absent.
//! There is no eviction beyond TTL expiry (unbounded growth over the process
//! lifetime is acceptable for this workload).

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::models::{CloudProvider, CostCategory, PriceQuotation};

/// Cache key: one entry per provider/category/region/SKU combination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub provider: CloudProvider,
    pub category: CostCategory,
    pub region: String,
    pub spec_id: String,
}

impl CacheKey {
    pub fn new(
        provider: CloudProvider,
        category: CostCategory,
        region: &str,
        spec_id: &str,
    ) -> Self {
        Self {
            provider,
            category,
            region: region.to_string(),
            spec_id: spec_id.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    quotation: PriceQuotation,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// TTL-keyed store of price quotations, safe under concurrent access
#[derive(Debug, Default)]
pub struct PricingCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl PricingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a non-expired quotation. Expired entries are removed and reported
    /// as absent; they are never served.
    pub fn get(&self, key: &CacheKey) -> Option<PriceQuotation> {
        let expired = {
            let entries = self.entries.read().expect("pricing cache lock poisoned");
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.quotation.clone()),
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut entries = self.entries.write().expect("pricing cache lock poisoned");
            // Re-check under the write lock: a fresh value may have landed
            if entries.get(key).is_some_and(|e| e.is_expired()) {
                entries.remove(key);
            }
        }

        None
    }

    /// Store a quotation with the given time-to-live, replacing any previous
    /// entry for the key.
    pub fn put(&self, key: CacheKey, quotation: PriceQuotation, ttl: Duration) {
        let mut entries = self.entries.write().expect("pricing cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                quotation,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries
            .write()
            .expect("pricing cache lock poisoned")
            .clear();
    }

    /// Number of stored entries, including not-yet-collected expired ones
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("pricing cache lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
