//! In-memory record stores
//!
//! Each repository owns its records behind a lock and is handed to services
//! by `Arc`. Stores are seeded from JSON arrays on disk.

pub mod equipment;
pub mod inventory;
pub mod invoices;
pub mod loads;
pub mod maintenance_tasks;
pub mod personnel;

use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

pub use equipment::EquipmentRepository;
pub use inventory::InventoryRepository;
pub use invoices::InvoiceRepository;
pub use loads::LoadRepository;
pub use maintenance_tasks::{MaintenanceTaskRepository, TaskFilter};
pub use personnel::{PersonnelFilter, PersonnelRepository};

/// Read a JSON array of records from `path`
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<T> = serde_json::from_str(&raw)?;
    tracing::debug!(path = %path.display(), count = records.len(), "Read records");
    Ok(records)
}

fn read_lock<T>(lock: &RwLock<T>) -> AppResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| AppError::Internal("record store lock poisoned".to_string()))
}

fn write_lock<T>(lock: &RwLock<T>) -> AppResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| AppError::Internal("record store lock poisoned".to_string()))
}
