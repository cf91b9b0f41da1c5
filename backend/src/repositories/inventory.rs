//! Finished-material bin store

use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{InventoryBin, ValidationError};
use uuid::Uuid;

use super::{read_json_array, read_lock, write_lock};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct InventoryRepository {
    bins: RwLock<Vec<InventoryBin>>,
}

impl InventoryRepository {
    pub fn new(bins: Vec<InventoryBin>) -> Self {
        Self {
            bins: RwLock::new(bins),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let bins: Vec<InventoryBin> = read_json_array(path)?;
        tracing::info!("Loaded {} inventory bins", bins.len());
        Ok(Self::new(bins))
    }

    pub fn get_all(&self) -> AppResult<Vec<InventoryBin>> {
        Ok(read_lock(&self.bins)?.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<InventoryBin> {
        read_lock(&self.bins)?
            .iter()
            .find(|bin| bin.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Inventory bin {}", id)))
    }

    /// Bins whose material name contains `query`, ignoring case
    pub fn get_by_material(&self, query: &str) -> AppResult<Vec<InventoryBin>> {
        let query = query.to_lowercase();
        Ok(read_lock(&self.bins)?
            .iter()
            .filter(|bin| bin.material.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    /// Add (or with a negative `delta`, draw) tonnes from a bin
    pub fn adjust_quantity(&self, id: Uuid, delta: Decimal, at: DateTime<Utc>) -> AppResult<InventoryBin> {
        let mut bins = write_lock(&self.bins)?;
        let bin = bins
            .iter_mut()
            .find(|bin| bin.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Inventory bin {}", id)))?;

        let quantity = bin.quantity + delta;
        if quantity < Decimal::ZERO {
            tracing::warn!(%id, %delta, "Rejected draw below empty");
            return Err(ValidationError::Negative { field: "quantity" }.into());
        }
        bin.quantity = quantity;
        bin.last_updated = at;

        tracing::info!(%id, material = %bin.material, %quantity, "Adjusted bin quantity");
        Ok(bin.clone())
    }
}
