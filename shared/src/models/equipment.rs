//! Plant equipment models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operating status reported for a unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Online,
    Warning,
    Error,
    Offline,
}

/// A piece of processing equipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    /// Equipment class, e.g. "Crusher" or "Screen"
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub status: EquipmentStatus,
    /// Cumulative running hours
    pub usage_hours: Decimal,
    /// Average running hours per day, when known
    #[serde(default)]
    pub avg_daily_usage: Option<Decimal>,
    pub last_maintenance: DateTime<Utc>,
}
