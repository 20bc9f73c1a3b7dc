//! Single-slot TTL cache for the aggregated upcoming-matches response

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::cache;
use crate::pipeline::models::UpcomingMatchesData;

/// One cached aggregate result with the moment it was produced
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: UpcomingMatchesData,
    pub cached_at: Instant,
}

/// Read-only cache description for the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    pub present: bool,
    pub age_seconds: Option<u64>,
    pub fresh: bool,
}

/// Deliberately a single slot, not a general cache store: the pipeline
/// has exactly one aggregate result, replaced wholesale on every
/// successful run. An entry is atomically all-valid or all-stale.
#[derive(Debug)]
pub struct ResponseCache {
    entry: Option<CacheEntry>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(cache::RESPONSE_TTL_SECONDS))
    }

    /// Cache with an explicit TTL, used by tests
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// Returns the cached aggregate and its age in seconds while the
    /// entry is fresh; `None` on miss or staleness. Stale entries are
    /// left in place and simply overwritten by the next `put`.
    pub fn get(&self) -> Option<(&UpcomingMatchesData, u64)> {
        let entry = self.entry.as_ref()?;
        let age = entry.cached_at.elapsed();
        if age < self.ttl {
            debug!("Response cache hit, age {:?}", age);
            Some((&entry.data, age.as_secs()))
        } else {
            debug!("Response cache stale, age {:?} exceeds ttl {:?}", age, self.ttl);
            None
        }
    }

    /// Replaces the entry wholesale with the new result and current time
    pub fn put(&mut self, data: UpcomingMatchesData) {
        debug!("Caching aggregate result with {} fixtures", data.count);
        self.entry = Some(CacheEntry {
            data,
            cached_at: Instant::now(),
        });
    }

    /// Describes the slot without touching it
    pub fn status(&self) -> CacheStatus {
        match &self.entry {
            Some(entry) => {
                let age = entry.cached_at.elapsed();
                CacheStatus {
                    present: true,
                    age_seconds: Some(age.as_secs()),
                    fresh: age < self.ttl,
                }
            }
            None => CacheStatus {
                present: false,
                age_seconds: None,
                fresh: false,
            },
        }
    }
}
