//! Weighbridge load store

use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use shared::{validate_new_load, Load, LoadStatus, NewLoad};
use uuid::Uuid;

use super::{read_json_array, read_lock, write_lock};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct LoadRepository {
    loads: RwLock<Vec<Load>>,
}

impl LoadRepository {
    pub fn new(loads: Vec<Load>) -> Self {
        Self {
            loads: RwLock::new(loads),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let loads: Vec<Load> = read_json_array(path)?;
        tracing::info!("Loaded {} weighbridge loads", loads.len());
        Ok(Self::new(loads))
    }

    pub fn get_all(&self) -> AppResult<Vec<Load>> {
        Ok(read_lock(&self.loads)?.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<Load> {
        tracing::debug!(%id, "Looking up load");
        read_lock(&self.loads)?
            .iter()
            .find(|load| load.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Load {}", id)))
    }

    pub fn get_by_status(&self, status: LoadStatus) -> AppResult<Vec<Load>> {
        Ok(read_lock(&self.loads)?
            .iter()
            .filter(|load| load.status == status)
            .cloned()
            .collect())
    }

    /// The `limit` most recent arrivals, newest first
    pub fn get_recent(&self, limit: usize) -> AppResult<Vec<Load>> {
        let mut loads = self.get_all()?;
        loads.sort_by(|a, b| b.arrival_time.cmp(&a.arrival_time));
        loads.truncate(limit);
        Ok(loads)
    }

    /// Record a new arrival as pending.
    ///
    /// A blank load number is replaced with `LD-` and a four digit sequence.
    pub fn create(&self, input: NewLoad, arrival_time: DateTime<Utc>) -> AppResult<Load> {
        if let Err(e) = validate_new_load(&input) {
            tracing::warn!(truck = %input.truck_number, "Rejected load: {}", e);
            return Err(e.into());
        }

        let mut loads = write_lock(&self.loads)?;
        let load_number = match input.load_number {
            Some(number) if !number.trim().is_empty() => number,
            _ => format!("LD-{:04}", loads.len() + 1),
        };

        let load = Load {
            id: Uuid::new_v4(),
            load_number,
            weight: input.weight,
            source: input.source,
            driver: input.driver,
            truck_number: input.truck_number,
            chemistry: input.chemistry,
            arrival_time,
            status: LoadStatus::Pending,
        };
        loads.push(load.clone());

        tracing::info!(id = %load.id, load_number = %load.load_number, weight = %load.weight, "Recorded load");
        Ok(load)
    }

    /// Move a load one step along pending, processing, processed
    pub fn update_status(&self, id: Uuid, next: LoadStatus) -> AppResult<Load> {
        let mut loads = write_lock(&self.loads)?;
        let load = loads
            .iter_mut()
            .find(|load| load.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Load {}", id)))?;

        load.status = load.status.advance_to(next).map_err(|e| {
            tracing::warn!(%id, "Rejected status change: {}", e);
            AppError::InvalidStateTransition(e.to_string())
        })?;

        tracing::info!(%id, status = %load.status, "Load status updated");
        Ok(load.clone())
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut loads = write_lock(&self.loads)?;
        let index = loads
            .iter()
            .position(|load| load.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Load {}", id)))?;
        loads.remove(index);
        tracing::info!(%id, "Deleted load");
        Ok(())
    }

    pub fn len(&self) -> AppResult<usize> {
        Ok(read_lock(&self.loads)?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }
}
