//! Maintenance planning and task generation

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use shared::{
    task_statistics, MaintenancePriority, MaintenanceSchedule, MaintenanceTask,
    NewMaintenanceTask, PlantParameters, TaskStatistics, TaskStatus, TaskType,
};
use uuid::Uuid;

use super::personnel::{PersonnelService, MAINTENANCE_ROLE};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    EquipmentRepository, MaintenanceTaskRepository, PersonnelRepository, TaskFilter,
};

/// Start of the shift that generated tasks are booked into
const SHIFT_START_HOUR: u32 = 8;

pub struct MaintenanceService {
    equipment: Arc<EquipmentRepository>,
    tasks: Arc<MaintenanceTaskRepository>,
    personnel: Arc<PersonnelRepository>,
    params: Arc<PlantParameters>,
}

impl MaintenanceService {
    pub fn new(
        equipment: Arc<EquipmentRepository>,
        tasks: Arc<MaintenanceTaskRepository>,
        personnel: Arc<PersonnelRepository>,
        params: Arc<PlantParameters>,
    ) -> Self {
        Self {
            equipment,
            tasks,
            personnel,
            params,
        }
    }

    /// Proposed service for every unit, most urgent first
    pub fn proposed_schedule(&self, now: DateTime<Utc>) -> AppResult<Vec<MaintenanceSchedule>> {
        let equipment = self.equipment.get_all()?;
        let schedule = self.params.maintenance.schedule_all(&equipment, now);
        tracing::info!(units = schedule.len(), "Built maintenance schedule");
        Ok(schedule)
    }

    /// Book a preventive task for each high priority proposal.
    ///
    /// Tasks open at 08:00 on the proposed date. Units that already have an
    /// open preventive task on that date are skipped. Each task takes a slot
    /// from `assignee`, who is refused once at the task limit. Without an
    /// assignee, the least loaded maintenance technician with room is picked
    /// per task, and the task stays unassigned when nobody has room.
    pub fn generate_tasks(&self, now: DateTime<Utc>, assignee: Option<Uuid>) -> AppResult<Vec<MaintenanceTask>> {
        if let Some(id) = assignee {
            self.personnel.get_by_id(id)?;
        }
        let mut created = Vec::new();

        for item in self.proposed_schedule(now)? {
            if item.priority != MaintenancePriority::High {
                continue;
            }

            let scheduled_date = shift_start(item.next_maintenance)?;
            if self.has_open_task(item.equipment_id, scheduled_date)? {
                tracing::debug!(equipment = %item.equipment_name, "Preventive task already booked");
                continue;
            }

            let assigned_to = self.take_slot(assignee)?;
            let result = self.tasks.create(
                NewMaintenanceTask {
                    title: format!("{} Maintenance - {}", item.equipment_type, item.equipment_name),
                    description: format!(
                        "Scheduled maintenance based on usage patterns. Equipment has {} usage hours.",
                        item.usage_hours
                    ),
                    equipment_id: item.equipment_id,
                    assigned_to,
                    scheduled_date,
                    estimated_duration: item.estimated_duration,
                    priority: item.priority,
                    status: TaskStatus::Scheduled,
                    task_type: TaskType::Preventive,
                    notes: String::new(),
                },
                now,
            );
            match result {
                Ok(task) => created.push(task),
                Err(e) => {
                    if let Some(id) = assigned_to {
                        self.personnel.unassign_task(id)?;
                    }
                    return Err(e);
                }
            }
        }

        tracing::info!("Generated {} maintenance tasks based on equipment usage", created.len());
        Ok(created)
    }

    /// Complete a task and hand its slot back to the assignee
    pub fn complete_task(&self, id: Uuid, notes: Option<String>, now: DateTime<Utc>) -> AppResult<MaintenanceTask> {
        let task = self.tasks.complete(id, notes, now)?;
        if let Some(person) = task.assigned_to {
            if let Err(e) = self.personnel.unassign_task(person) {
                tracing::warn!(task = %id, %person, "Could not release assignee: {}", e);
            }
        }
        Ok(task)
    }

    pub fn statistics(&self, now: DateTime<Utc>) -> AppResult<TaskStatistics> {
        Ok(task_statistics(&self.tasks.get_all()?, now))
    }

    /// Open tasks scheduled before `now`, oldest first
    pub fn overdue_tasks(&self, now: DateTime<Utc>) -> AppResult<Vec<MaintenanceTask>> {
        Ok(self
            .tasks
            .find(&TaskFilter::default())?
            .into_iter()
            .filter(|task| task.is_overdue(now))
            .collect())
    }

    fn take_slot(&self, assignee: Option<Uuid>) -> AppResult<Option<Uuid>> {
        if let Some(id) = assignee {
            return Ok(Some(self.personnel.assign_task(id)?.id));
        }

        let crew = PersonnelService::new(self.personnel.clone());
        match crew.available_in_role(MAINTENANCE_ROLE)?.first() {
            Some(person) => Ok(Some(self.personnel.assign_task(person.id)?.id)),
            None => {
                tracing::warn!("No maintenance technician has capacity; task left unassigned");
                Ok(None)
            }
        }
    }

    fn has_open_task(&self, equipment_id: Uuid, scheduled_date: DateTime<Utc>) -> AppResult<bool> {
        let filter = TaskFilter {
            equipment_id: Some(equipment_id),
            ..TaskFilter::default()
        };
        Ok(self.tasks.find(&filter)?.iter().any(|task| {
            task.task_type == TaskType::Preventive
                && matches!(task.status, TaskStatus::Scheduled | TaskStatus::InProgress)
                && task.scheduled_date == scheduled_date
        }))
    }
}

/// 08:00 UTC on the calendar date of `at`
fn shift_start(at: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(SHIFT_START_HOUR, 0, 0)
        .ok_or_else(|| AppError::Internal("invalid shift start".to_string()))?;
    Ok(Utc.from_utc_datetime(&at.date_naive().and_time(time)))
}
