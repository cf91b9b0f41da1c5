//! Crew store and workload tests
//!
//! Tests for plant personnel including:
//! - Filters by role, shift, skill and availability
//! - Task capacity on assign and unassign
//! - Workload statistics over the fixture crew

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{Availability, NewPersonnel};
use slag_plant_backend::repositories::{PersonnelFilter, PersonnelRepository};
use slag_plant_backend::services::PersonnelService;
use slag_plant_backend::AppError;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn fixture_repo() -> Arc<PersonnelRepository> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/personnel.json");
    Arc::new(PersonnelRepository::from_file(&path).unwrap())
}

fn new_person(name: &str, max_tasks: u32) -> NewPersonnel {
    NewPersonnel {
        name: name.to_string(),
        role: "Maintenance".to_string(),
        department: "Engineering".to_string(),
        shift: "Night".to_string(),
        skills: vec!["Electrical".to_string()],
        experience: dec("2.5"),
        max_tasks,
    }
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_fixture_workload() {
        let stats = PersonnelService::new(fixture_repo()).workload().unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.available, 3);
        assert_eq!(stats.busy, 1);
        assert_eq!(stats.by_role["Maintenance"], 2);
        assert_eq!(stats.by_department["Operations"], 2);
        assert_eq!(stats.by_shift["Day"], 3);
        assert_eq!(stats.average_experience, Some(dec("9.5")));
        assert_eq!(stats.total_tasks, 9);
        assert_eq!(stats.max_capacity, 16);
    }

    #[test]
    fn test_filters_combine() {
        let repo = fixture_repo();
        let welders = repo
            .find(&PersonnelFilter {
                skill: Some("welding".to_string()),
                ..PersonnelFilter::default()
            })
            .unwrap();
        assert_eq!(welders.len(), 2);

        let night_maintenance = repo
            .find(&PersonnelFilter {
                role: Some("Maintenance".to_string()),
                shift: Some("Night".to_string()),
                ..PersonnelFilter::default()
            })
            .unwrap();
        assert_eq!(night_maintenance.len(), 1);
        assert_eq!(night_maintenance[0].name, "K. Osei");
    }

    #[test]
    fn test_available_excludes_full_crew() {
        let names: Vec<String> = fixture_repo()
            .available()
            .unwrap()
            .into_iter()
            .map(|person| person.name)
            .collect();
        assert_eq!(names, vec!["R. Tan", "L. Moreno", "P. Novak"]);
    }

    #[test]
    fn test_available_in_role_orders_by_load() {
        let repo = fixture_repo();
        let extra = repo.create(new_person("S. Ivanova", 2), start()).unwrap();

        let ready = PersonnelService::new(repo).available_in_role("Maintenance").unwrap();
        assert_eq!(ready[0].id, extra.id);
        assert_eq!(ready[1].name, "R. Tan");
        assert_eq!(ready.len(), 2);
    }

    #[test]
    fn test_create_starts_idle() {
        let repo = PersonnelRepository::default();
        let person = repo.create(new_person("S. Ivanova", 2), start()).unwrap();

        assert_eq!(person.current_tasks, 0);
        assert_eq!(person.availability, Availability::Available);
        assert_eq!(person.start_date, start());
        assert_eq!(repo.get_by_id(person.id).unwrap(), person);
    }

    #[test]
    fn test_create_requires_capacity() {
        let err = PersonnelRepository::default()
            .create(new_person("S. Ivanova", 0), start())
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_assign_until_full_then_refuse() {
        let repo = PersonnelRepository::default();
        let id = repo.create(new_person("S. Ivanova", 2), start()).unwrap().id;

        assert_eq!(repo.assign_task(id).unwrap().availability, Availability::Available);
        let full = repo.assign_task(id).unwrap();
        assert_eq!(full.current_tasks, 2);
        assert_eq!(full.availability, Availability::Busy);

        let err = repo.assign_task(id).unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
        assert_eq!(repo.get_by_id(id).unwrap().current_tasks, 2);
    }

    #[test]
    fn test_unassign_reopens_and_stops_at_zero() {
        let repo = PersonnelRepository::default();
        let id = repo.create(new_person("S. Ivanova", 1), start()).unwrap().id;
        repo.assign_task(id).unwrap();

        let freed = repo.unassign_task(id).unwrap();
        assert_eq!(freed.current_tasks, 0);
        assert_eq!(freed.availability, Availability::Available);

        assert!(matches!(
            repo.unassign_task(id),
            Err(AppError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_unknown_person() {
        let repo = PersonnelRepository::default();
        assert!(matches!(repo.assign_task(Uuid::new_v4()), Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(Uuid::new_v4()), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_from_workload() {
        let repo = fixture_repo();
        let novak = repo
            .find(&PersonnelFilter {
                role: Some("Supervisor".to_string()),
                ..PersonnelFilter::default()
            })
            .unwrap()[0]
            .id;
        repo.delete(novak).unwrap();

        let stats = PersonnelService::new(repo).workload().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.max_capacity, 14);
    }
}
