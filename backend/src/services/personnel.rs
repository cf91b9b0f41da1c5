//! Crew workload reporting

use std::sync::Arc;

use shared::{workload_statistics, Personnel, WorkloadStatistics};

use crate::error::AppResult;
use crate::repositories::{PersonnelFilter, PersonnelRepository};

/// Role that generated maintenance tasks go to when no one is named
pub const MAINTENANCE_ROLE: &str = "Maintenance";

pub struct PersonnelService {
    personnel: Arc<PersonnelRepository>,
}

impl PersonnelService {
    pub fn new(personnel: Arc<PersonnelRepository>) -> Self {
        Self { personnel }
    }

    pub fn workload(&self) -> AppResult<WorkloadStatistics> {
        Ok(workload_statistics(&self.personnel.get_all()?))
    }

    /// Crew in `role` who can take another task, least loaded first
    pub fn available_in_role(&self, role: &str) -> AppResult<Vec<Personnel>> {
        let filter = PersonnelFilter {
            role: Some(role.to_string()),
            ..PersonnelFilter::default()
        };
        let mut crew: Vec<Personnel> = self
            .personnel
            .find(&filter)?
            .into_iter()
            .filter(Personnel::has_capacity)
            .collect();
        crew.sort_by_key(|person| person.current_tasks);
        Ok(crew)
    }
}
