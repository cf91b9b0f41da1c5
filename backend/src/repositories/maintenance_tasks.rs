//! Maintenance task store

use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    DateRange, MaintenancePriority, MaintenanceTask, NewMaintenanceTask, TaskStatus,
    UpdateMaintenanceTask, ValidationError,
};
use uuid::Uuid;

use super::{read_json_array, read_lock, write_lock};
use crate::error::{AppError, AppResult};

/// Criteria for listing tasks; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<MaintenancePriority>,
    pub assigned_to: Option<Uuid>,
    pub equipment_id: Option<Uuid>,
    /// Inclusive on the scheduled calendar date
    pub scheduled: Option<DateRange>,
}

impl TaskFilter {
    pub fn matches(&self, task: &MaintenanceTask) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
            && self
                .assigned_to
                .map_or(true, |assignee| task.assigned_to == Some(assignee))
            && self
                .equipment_id
                .map_or(true, |equipment_id| task.equipment_id == equipment_id)
            && self
                .scheduled
                .as_ref()
                .map_or(true, |range| range.contains_timestamp(task.scheduled_date))
    }
}

#[derive(Debug, Default)]
pub struct MaintenanceTaskRepository {
    tasks: RwLock<Vec<MaintenanceTask>>,
}

impl MaintenanceTaskRepository {
    pub fn new(tasks: Vec<MaintenanceTask>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let tasks: Vec<MaintenanceTask> = read_json_array(path)?;
        tracing::info!("Loaded {} maintenance tasks", tasks.len());
        Ok(Self::new(tasks))
    }

    pub fn get_all(&self) -> AppResult<Vec<MaintenanceTask>> {
        Ok(read_lock(&self.tasks)?.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<MaintenanceTask> {
        tracing::debug!(%id, "Looking up maintenance task");
        read_lock(&self.tasks)?
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Maintenance task {}", id)))
    }

    /// Tasks matching `filter`, earliest scheduled first
    pub fn find(&self, filter: &TaskFilter) -> AppResult<Vec<MaintenanceTask>> {
        let mut tasks: Vec<MaintenanceTask> = read_lock(&self.tasks)?
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.scheduled_date.cmp(&b.scheduled_date));
        Ok(tasks)
    }

    pub fn create(&self, input: NewMaintenanceTask, now: DateTime<Utc>) -> AppResult<MaintenanceTask> {
        if input.title.trim().is_empty() {
            return Err(ValidationError::Missing { field: "title" }.into());
        }
        if input.estimated_duration < Decimal::ZERO {
            return Err(ValidationError::Negative { field: "estimated_duration" }.into());
        }

        let task = MaintenanceTask {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            equipment_id: input.equipment_id,
            assigned_to: input.assigned_to,
            scheduled_date: input.scheduled_date,
            estimated_duration: input.estimated_duration,
            priority: input.priority,
            status: input.status,
            task_type: input.task_type,
            created_date: now,
            completed_date: None,
            notes: input.notes,
        };
        write_lock(&self.tasks)?.push(task.clone());

        tracing::info!(id = %task.id, title = %task.title, priority = %task.priority, "Created maintenance task");
        Ok(task)
    }

    pub fn update(&self, id: Uuid, changes: UpdateMaintenanceTask) -> AppResult<MaintenanceTask> {
        let mut tasks = write_lock(&self.tasks)?;
        let task = find_mut(&mut tasks, id)?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(assignee) = changes.assigned_to {
            task.assigned_to = Some(assignee);
        }
        if let Some(scheduled_date) = changes.scheduled_date {
            task.scheduled_date = scheduled_date;
        }
        if let Some(duration) = changes.estimated_duration {
            task.estimated_duration = duration;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(task_type) = changes.task_type {
            task.task_type = task_type;
        }
        if let Some(notes) = changes.notes {
            task.notes = notes;
        }

        tracing::info!(%id, status = ?task.status, "Updated maintenance task");
        Ok(task.clone())
    }

    /// Close a task at `now`, keeping its notes unless new ones are given
    pub fn complete(&self, id: Uuid, notes: Option<String>, now: DateTime<Utc>) -> AppResult<MaintenanceTask> {
        let mut tasks = write_lock(&self.tasks)?;
        let task = find_mut(&mut tasks, id)?;

        if matches!(task.status, TaskStatus::Completed | TaskStatus::Cancelled) {
            return Err(AppError::InvalidStateTransition(format!(
                "Maintenance task {} is already {:?}",
                id, task.status
            )));
        }

        task.status = TaskStatus::Completed;
        task.completed_date = Some(now);
        if let Some(notes) = notes.filter(|n| !n.is_empty()) {
            task.notes = notes;
        }

        tracing::info!(%id, "Completed maintenance task");
        Ok(task.clone())
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tasks = write_lock(&self.tasks)?;
        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Maintenance task {}", id)))?;
        tasks.remove(index);
        tracing::info!(%id, "Deleted maintenance task");
        Ok(())
    }
}

fn find_mut(tasks: &mut [MaintenanceTask], id: Uuid) -> AppResult<&mut MaintenanceTask> {
    tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Maintenance task {}", id)))
}
