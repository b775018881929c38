// src/services/cache.rs
use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;
use tokio::sync::RwLock;

use crate::services::open_meteo::ForecastPayload;

pub const CACHE_CAPACITY: usize = 100;
pub const CACHE_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    payload: ForecastPayload,
    inserted_at: Instant,
}

/// In-memory store for raw provider payloads. Entries are served only within
/// the TTL window; lookups and inserts may interleave freely across requests,
/// so two concurrent misses for one key can both fetch upstream. That race is
/// harmless: the second insert simply replaces the first.
pub struct PayloadCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
    ttl: Duration,
}

impl PayloadCache {
    pub fn new() -> Self {
        Self::with_settings(CACHE_CAPACITY, CACHE_TTL)
    }

    pub fn with_settings(capacity: usize, ttl: Duration) -> Self {
        PayloadCache {
            entries: RwLock::new(HashMap::new()),
            capacity,
            ttl,
        }
    }

    /// Cache key for a request. Coordinates are formatted exactly as given,
    /// so 52.5 and 52.50 address different entries.
    pub fn key(purpose: &str, latitude: f64, longitude: f64) -> String {
        format!("{}_{}_{}", purpose, latitude, longitude)
    }

    pub async fn get(&self, key: &str) -> Option<ForecastPayload> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() < self.ttl {
            debug!("Cache hit for {}", key);
            Some(entry.payload.clone())
        } else {
            debug!("Cache entry for {} expired", key);
            None
        }
    }

    pub async fn insert(&self, key: String, payload: ForecastPayload) {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    debug!("Cache full, evicting {}", oldest);
                    entries.remove(&oldest);
                }
            }
        }
        entries.insert(
            key,
            CacheEntry {
                payload,
                inserted_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
