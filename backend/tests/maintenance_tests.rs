//! Maintenance planning tests
//!
//! Tests for equipment maintenance including:
//! - Proposed schedule over the equipment register
//! - Preventive task generation for high priority units
//! - Crew capacity when tasks are assigned
//! - Task store filters, completion and statistics

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{
    Availability, DateRange, EquipmentStatus, MaintenancePriority, NewMaintenanceTask, PlantParameters, TaskStatus, TaskType,
    UpdateMaintenanceTask,
};
use slag_plant_backend::repositories::{
    EquipmentRepository, MaintenanceTaskRepository, PersonnelFilter, PersonnelRepository,
    TaskFilter,
};
use slag_plant_backend::services::MaintenanceService;
use slag_plant_backend::AppError;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 25, 12, 0, 0).unwrap()
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Fixture technician with open tasks on the calendar (3 of 5 slots used)
fn tan() -> Uuid {
    Uuid::parse_str("a5e52098-7a66-5cc0-b98b-8c77b2d076e8").unwrap()
}

fn fixture_crew() -> Arc<PersonnelRepository> {
    Arc::new(PersonnelRepository::from_file(&fixture("personnel.json")).unwrap())
}

fn service_with_crew(
    crew: Arc<PersonnelRepository>,
) -> (Arc<MaintenanceTaskRepository>, MaintenanceService) {
    let equipment = EquipmentRepository::from_file(&fixture("equipment.json")).unwrap();
    let tasks = Arc::new(MaintenanceTaskRepository::from_file(&fixture("maintenance_tasks.json")).unwrap());
    let service = MaintenanceService::new(
        Arc::new(equipment),
        tasks.clone(),
        crew,
        Arc::new(PlantParameters::default()),
    );
    (tasks, service)
}

fn fixture_service() -> (Arc<MaintenanceTaskRepository>, MaintenanceService) {
    service_with_crew(fixture_crew())
}

fn new_task(title: &str, scheduled_date: DateTime<Utc>) -> NewMaintenanceTask {
    NewMaintenanceTask {
        title: title.to_string(),
        description: String::new(),
        equipment_id: Uuid::new_v4(),
        assigned_to: None,
        scheduled_date,
        estimated_duration: dec("2"),
        priority: MaintenancePriority::Medium,
        status: TaskStatus::Scheduled,
        task_type: TaskType::Routine,
        notes: String::new(),
    }
}

// ============================================================================
// Schedule Tests
// ============================================================================

#[cfg(test)]
mod schedule_tests {
    use super::*;

    #[test]
    fn test_fixture_schedule_order() {
        let (_, service) = fixture_service();
        let schedule = service.proposed_schedule(now()).unwrap();
        let names: Vec<&str> = schedule.iter().map(|s| s.equipment_name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Primary Crusher",
                "Main Conveyor",
                "Magnetic Separator",
                "Ball Grinder",
                "Vibrating Screen 1",
            ]
        );
    }

    #[test]
    fn test_crusher_due_in_three_days() {
        let (_, service) = fixture_service();
        let schedule = service.proposed_schedule(now()).unwrap();
        let crusher = &schedule[0];

        // 4480 h is 480 into a 500 h cycle; 20 h at 8 h/day
        assert_eq!(crusher.days_until_maintenance, 3);
        assert_eq!(crusher.days_since_last_maintenance, 15);
        assert_eq!(crusher.priority, MaintenancePriority::High);
        assert_eq!(crusher.estimated_duration, dec("4"));
    }

    #[test]
    fn test_long_unserviced_conveyor_is_high() {
        let (_, service) = fixture_service();
        let schedule = service.proposed_schedule(now()).unwrap();
        let conveyor = &schedule[1];

        assert_eq!(conveyor.days_until_maintenance, 40);
        assert!(conveyor.days_since_last_maintenance > 30);
        assert_eq!(conveyor.priority, MaintenancePriority::High);
    }

    #[test]
    fn test_separator_without_usage_uses_default_rate() {
        let (_, service) = fixture_service();
        let schedule = service.proposed_schedule(now()).unwrap();
        let separator = &schedule[2];

        // 100 h left at the default 8 h/day
        assert_eq!(separator.days_until_maintenance, 13);
        assert_eq!(separator.priority, MaintenancePriority::Medium);
    }
}

// ============================================================================
// Task Generation Tests
// ============================================================================

#[cfg(test)]
mod generation_tests {
    use super::*;

    #[test]
    fn test_generates_preventive_tasks_for_high_priority() {
        let crew = fixture_crew();
        let (tasks, service) = service_with_crew(crew.clone());
        let created = service.generate_tasks(now(), Some(tan())).unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(tasks.get_all().unwrap().len(), 6);

        let crusher = &created[0];
        assert_eq!(crusher.title, "Crusher Maintenance - Primary Crusher");
        assert_eq!(
            crusher.scheduled_date,
            Utc.with_ymd_and_hms(2024, 1, 28, 8, 0, 0).unwrap()
        );
        assert_eq!(crusher.task_type, TaskType::Preventive);
        assert_eq!(crusher.status, TaskStatus::Scheduled);
        assert_eq!(crusher.priority, MaintenancePriority::High);
        assert_eq!(crusher.assigned_to, Some(tan()));
        assert_eq!(crusher.created_date, now());
        assert!(crusher.description.contains("4480 usage hours"));

        assert_eq!(
            created[1].scheduled_date,
            Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap()
        );

        // Both tasks took a slot: 5 of 5 used
        let technician = crew.get_by_id(tan()).unwrap();
        assert_eq!(technician.current_tasks, 5);
        assert_eq!(technician.availability, Availability::Busy);
    }

    #[test]
    fn test_generation_is_not_repeated() {
        let (tasks, service) = fixture_service();
        service.generate_tasks(now(), None).unwrap();
        let again = service.generate_tasks(now(), None).unwrap();

        assert!(again.is_empty());
        assert_eq!(tasks.get_all().unwrap().len(), 6);
    }

    #[test]
    fn test_unknown_assignee_is_rejected_before_booking() {
        let (tasks, service) = fixture_service();
        let err = service.generate_tasks(now(), Some(Uuid::new_v4())).unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(tasks.get_all().unwrap().len(), 4);
    }

    #[test]
    fn test_full_assignee_is_refused() {
        let crew = fixture_crew();
        let osei = crew
            .find(&PersonnelFilter {
                role: Some("Maintenance".to_string()),
                availability: Some(Availability::Busy),
                ..PersonnelFilter::default()
            })
            .unwrap()[0]
            .id;
        let (tasks, service) = service_with_crew(crew);

        let err = service.generate_tasks(now(), Some(osei)).unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE_TRANSITION");
        assert!(err.to_string().contains("maximum task capacity"));
        assert_eq!(tasks.get_all().unwrap().len(), 4);
    }

    #[test]
    fn test_unnamed_tasks_go_to_technician_with_room() {
        let crew = fixture_crew();
        let (_, service) = service_with_crew(crew.clone());
        let created = service.generate_tasks(now(), None).unwrap();

        assert!(created.iter().all(|task| task.assigned_to == Some(tan())));
        assert_eq!(crew.get_by_id(tan()).unwrap().current_tasks, 5);
    }

    #[test]
    fn test_tasks_stay_unassigned_without_capacity() {
        let (_, service) = service_with_crew(Arc::new(PersonnelRepository::default()));
        let created = service.generate_tasks(now(), None).unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|task| task.assigned_to.is_none()));
    }

    #[test]
    fn test_completing_a_task_frees_the_assignee() {
        let crew = fixture_crew();
        let (tasks, service) = service_with_crew(crew.clone());
        let open = tasks
            .find(&TaskFilter {
                status: Some(TaskStatus::InProgress),
                ..TaskFilter::default()
            })
            .unwrap()[0]
            .id;

        let done = service
            .complete_task(open, Some("Belt re-tracked".to_string()), now())
            .unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(crew.get_by_id(tan()).unwrap().current_tasks, 2);
    }
}

// ============================================================================
// Task Store Tests
// ============================================================================

#[cfg(test)]
mod task_tests {
    use super::*;

    #[test]
    fn test_fixture_statistics() {
        let (_, service) = fixture_service();
        let stats = service.statistics(now()).unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.scheduled, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.high_priority, 2);
        assert_eq!(stats.medium_priority, 1);
        assert_eq!(stats.low_priority, 1);
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn test_overdue_tasks() {
        let (_, service) = fixture_service();
        let overdue = service.overdue_tasks(now()).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Conveyor belt tracking");
    }

    #[test]
    fn test_filters_combine() {
        let (tasks, _) = fixture_service();
        let scheduled = tasks
            .find(&TaskFilter {
                status: Some(TaskStatus::Scheduled),
                ..TaskFilter::default()
            })
            .unwrap();
        assert_eq!(scheduled.len(), 2);
        // earliest first
        assert_eq!(scheduled[0].title, "Screen deck replacement");

        let january = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let scheduled_in_january = tasks
            .find(&TaskFilter {
                status: Some(TaskStatus::Scheduled),
                scheduled: Some(january),
                ..TaskFilter::default()
            })
            .unwrap();
        assert_eq!(scheduled_in_january.len(), 1);

        let high = tasks
            .find(&TaskFilter {
                priority: Some(MaintenancePriority::High),
                ..TaskFilter::default()
            })
            .unwrap();
        assert_eq!(high.len(), 2);
    }

    #[test]
    fn test_filter_by_assignee_and_equipment() {
        let repo = MaintenanceTaskRepository::default();
        let technician = Uuid::new_v4();
        let mut input = new_task("Replace screen mesh", now());
        input.assigned_to = Some(technician);
        let task = repo.create(input, now()).unwrap();
        repo.create(new_task("Inspect idlers", now()), now()).unwrap();

        let mine = repo
            .find(&TaskFilter {
                assigned_to: Some(technician),
                ..TaskFilter::default()
            })
            .unwrap();
        assert_eq!(mine, vec![task.clone()]);

        let for_unit = repo
            .find(&TaskFilter {
                equipment_id: Some(task.equipment_id),
                ..TaskFilter::default()
            })
            .unwrap();
        assert_eq!(for_unit.len(), 1);
    }

    #[test]
    fn test_blank_title_rejected() {
        let repo = MaintenanceTaskRepository::default();
        let err = repo.create(new_task("  ", now()), now()).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_complete_sets_date_and_keeps_notes() {
        let repo = MaintenanceTaskRepository::default();
        let mut input = new_task("Grease bearings", now() - Duration::days(1));
        input.notes = "Use EP2 grease".to_string();
        let task = repo.create(input, now()).unwrap();

        let done = repo.complete(task.id, None, now()).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_date, Some(now()));
        assert_eq!(done.notes, "Use EP2 grease");
        assert!(!done.is_overdue(now()));

        let err = repo.complete(task.id, Some("again".to_string()), now()).unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let repo = MaintenanceTaskRepository::default();
        let task = repo.create(new_task("Grease bearings", now()), now()).unwrap();

        let updated = repo
            .update(
                task.id,
                UpdateMaintenanceTask {
                    priority: Some(MaintenancePriority::High),
                    status: Some(TaskStatus::InProgress),
                    ..UpdateMaintenanceTask::default()
                },
            )
            .unwrap();
        assert_eq!(updated.priority, MaintenancePriority::High);
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.title, "Grease bearings");
    }

    #[test]
    fn test_delete_unknown_task() {
        let repo = MaintenanceTaskRepository::default();
        assert!(matches!(repo.delete(Uuid::new_v4()), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_record_maintenance_resets_priority() {
        let equipment = Arc::new(EquipmentRepository::from_file(&fixture("equipment.json")).unwrap());
        let service = MaintenanceService::new(
            equipment.clone(),
            Arc::new(MaintenanceTaskRepository::default()),
            Arc::new(PersonnelRepository::default()),
            Arc::new(PlantParameters::default()),
        );
        let conveyor = equipment
            .get_all()
            .unwrap()
            .into_iter()
            .find(|unit| unit.name == "Main Conveyor")
            .unwrap();

        equipment.record_maintenance(conveyor.id, now()).unwrap();
        let schedule = service.proposed_schedule(now()).unwrap();
        let entry = schedule.iter().find(|s| s.equipment_id == conveyor.id).unwrap();
        assert_eq!(entry.days_since_last_maintenance, 0);
        assert_eq!(entry.priority, MaintenancePriority::Low);
    }

    #[test]
    fn test_logged_usage_brings_service_forward() {
        let equipment = Arc::new(EquipmentRepository::from_file(&fixture("equipment.json")).unwrap());
        let tables = PlantParameters::default().maintenance;
        let grinder = equipment
            .get_all()
            .unwrap()
            .into_iter()
            .find(|unit| unit.name == "Ball Grinder")
            .unwrap();

        // 410 h into a 600 h cycle, plus 150 h leaves 40 h
        let updated = equipment.log_usage(grinder.id, dec("150")).unwrap();
        assert_eq!(updated.usage_hours, dec("2360"));
        assert_eq!(tables.hours_until_service(&updated), dec("40"));

        let err = equipment.log_usage(grinder.id, dec("-1")).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_status_filter() {
        let equipment = EquipmentRepository::from_file(&fixture("equipment.json")).unwrap();
        assert_eq!(equipment.get_by_status(EquipmentStatus::Warning).unwrap().len(), 1);

        let crusher = equipment.get_all().unwrap()[0].clone();
        equipment.set_status(crusher.id, EquipmentStatus::Offline).unwrap();
        assert_eq!(equipment.get_by_status(EquipmentStatus::Offline).unwrap().len(), 1);
        assert!(matches!(
            equipment.set_status(Uuid::new_v4(), EquipmentStatus::Online),
            Err(AppError::NotFound(_))
        ));
    }
}
