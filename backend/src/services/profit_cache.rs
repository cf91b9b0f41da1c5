//! Content-addressed memo of profit records
//!
//! Entries are keyed by load id and a SHA-256 digest of the load's JSON form.
//! Any change to the load changes the digest, so stale records are never
//! served.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use sha2::{Digest, Sha256};
use shared::{Load, PlantParameters, ProfitRecord};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct ProfitCache {
    entries: RwLock<HashMap<Uuid, (String, ProfitRecord)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Hex SHA-256 of the load's serialized form
pub fn load_digest(load: &Load) -> AppResult<String> {
    let bytes = serde_json::to_vec(load)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
}

impl ProfitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record for `load`, computing and storing it on a miss
    pub fn get_or_compute(&self, load: &Load, params: &PlantParameters) -> AppResult<ProfitRecord> {
        let digest = load_digest(load)?;

        {
            let entries = self.entries.read().map_err(|_| poisoned())?;
            if let Some((stored, record)) = entries.get(&load.id) {
                if *stored == digest {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(record.clone());
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let record = params.compute_profit(load)?;
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(load.id, (digest, record.clone()));

        tracing::debug!(load_id = %load.id, "Cached profit record");
        Ok(record)
    }

    /// Drop the record stored for one load
    pub fn evict(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.entries.write().map_err(|_| poisoned())?.remove(&id).is_some())
    }

    /// Drop records for loads no longer in `live`
    pub fn retain_loads(&self, live: &HashSet<Uuid>) -> AppResult<usize> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|id, _| live.contains(id));
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted profit records of removed loads");
        }
        Ok(evicted)
    }

    /// Drop every stored record, e.g. after the parameter tables change
    pub fn clear(&self) -> AppResult<()> {
        self.entries.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }

    pub fn stats(&self) -> AppResult<CacheStats> {
        Ok(CacheStats {
            entries: self.entries.read().map_err(|_| poisoned())?.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        })
    }
}

fn poisoned() -> AppError {
    AppError::Internal("profit cache lock poisoned".to_string())
}
