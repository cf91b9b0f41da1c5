//! Maintenance scheduling and task models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Urgency of a maintenance job
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
}

impl MaintenancePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenancePriority::Low => "low",
            MaintenancePriority::Medium => "medium",
            MaintenancePriority::High => "high",
        }
    }
}

impl std::fmt::Display for MaintenancePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Proposed next service for one equipment unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceSchedule {
    pub equipment_id: Uuid,
    pub equipment_name: String,
    pub equipment_type: String,
    pub usage_hours: Decimal,
    pub next_maintenance: DateTime<Utc>,
    pub days_until_maintenance: i64,
    pub days_since_last_maintenance: i64,
    pub priority: MaintenancePriority,
    /// Expected job length in hours
    pub estimated_duration: Decimal,
}

/// Lifecycle of a maintenance task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Routine,
    Preventive,
    Corrective,
    Emergency,
}

/// A maintenance task on the calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub equipment_id: Uuid,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
    pub scheduled_date: DateTime<Utc>,
    pub estimated_duration: Decimal,
    pub priority: MaintenancePriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub task_type: TaskType,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

impl MaintenanceTask {
    /// Not completed and scheduled before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.scheduled_date < now
    }
}

/// Input for creating a maintenance task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub equipment_id: Uuid,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
    pub scheduled_date: DateTime<Utc>,
    pub estimated_duration: Decimal,
    pub priority: MaintenancePriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub notes: String,
}

/// Partial update for a maintenance task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMaintenanceTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub estimated_duration: Option<Decimal>,
    pub priority: Option<MaintenancePriority>,
    pub status: Option<TaskStatus>,
    pub task_type: Option<TaskType>,
    pub notes: Option<String>,
}

/// Counts over a set of maintenance tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub scheduled: usize,
    pub cancelled: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub overdue: usize,
}
