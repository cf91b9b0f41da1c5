//! Equipment register

use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{Equipment, EquipmentStatus, ValidationError};
use uuid::Uuid;

use super::{read_json_array, read_lock, write_lock};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct EquipmentRepository {
    equipment: RwLock<Vec<Equipment>>,
}

impl EquipmentRepository {
    pub fn new(equipment: Vec<Equipment>) -> Self {
        Self {
            equipment: RwLock::new(equipment),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let equipment: Vec<Equipment> = read_json_array(path)?;
        tracing::info!("Loaded {} equipment units", equipment.len());
        Ok(Self::new(equipment))
    }

    pub fn get_all(&self) -> AppResult<Vec<Equipment>> {
        Ok(read_lock(&self.equipment)?.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        tracing::debug!(%id, "Looking up equipment");
        read_lock(&self.equipment)?
            .iter()
            .find(|unit| unit.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Equipment {}", id)))
    }

    pub fn get_by_status(&self, status: EquipmentStatus) -> AppResult<Vec<Equipment>> {
        Ok(read_lock(&self.equipment)?
            .iter()
            .filter(|unit| unit.status == status)
            .cloned()
            .collect())
    }

    /// Add running hours to a unit's meter
    pub fn log_usage(&self, id: Uuid, hours: Decimal) -> AppResult<Equipment> {
        if hours < Decimal::ZERO {
            return Err(ValidationError::Negative { field: "usage_hours" }.into());
        }
        self.modify(id, |unit| unit.usage_hours += hours)
    }

    /// Mark a unit as serviced at `at`
    pub fn record_maintenance(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Equipment> {
        let unit = self.modify(id, |unit| unit.last_maintenance = at)?;
        tracing::info!(%id, name = %unit.name, "Recorded maintenance");
        Ok(unit)
    }

    pub fn set_status(&self, id: Uuid, status: EquipmentStatus) -> AppResult<Equipment> {
        self.modify(id, |unit| unit.status = status)
    }

    fn modify(&self, id: Uuid, change: impl FnOnce(&mut Equipment)) -> AppResult<Equipment> {
        let mut equipment = write_lock(&self.equipment)?;
        let unit = equipment
            .iter_mut()
            .find(|unit| unit.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {}", id)))?;
        change(unit);
        Ok(unit.clone())
    }
}
