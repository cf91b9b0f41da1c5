//! Plant crew store

use std::path::Path;
use std::sync::RwLock;

use chrono::NaiveDate;
use shared::{validate_new_personnel, Availability, NewPersonnel, Personnel, ValidationError};
use uuid::Uuid;

use super::{read_json_array, read_lock, write_lock};
use crate::error::{AppError, AppResult};

/// Criteria for listing crew; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct PersonnelFilter {
    pub role: Option<String>,
    pub department: Option<String>,
    pub shift: Option<String>,
    pub availability: Option<Availability>,
    pub skill: Option<String>,
}

impl PersonnelFilter {
    pub fn matches(&self, person: &Personnel) -> bool {
        self.role.as_deref().map_or(true, |role| person.role == role)
            && self
                .department
                .as_deref()
                .map_or(true, |department| person.department == department)
            && self.shift.as_deref().map_or(true, |shift| person.shift == shift)
            && self
                .availability
                .map_or(true, |availability| person.availability == availability)
            && self.skill.as_deref().map_or(true, |skill| person.has_skill(skill))
    }
}

#[derive(Debug, Default)]
pub struct PersonnelRepository {
    personnel: RwLock<Vec<Personnel>>,
}

impl PersonnelRepository {
    pub fn new(personnel: Vec<Personnel>) -> Self {
        Self {
            personnel: RwLock::new(personnel),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let personnel: Vec<Personnel> = read_json_array(path)?;
        tracing::info!("Loaded {} crew members", personnel.len());
        Ok(Self::new(personnel))
    }

    pub fn get_all(&self) -> AppResult<Vec<Personnel>> {
        Ok(read_lock(&self.personnel)?.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<Personnel> {
        read_lock(&self.personnel)?
            .iter()
            .find(|person| person.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Personnel {}", id)))
    }

    pub fn find(&self, filter: &PersonnelFilter) -> AppResult<Vec<Personnel>> {
        Ok(read_lock(&self.personnel)?
            .iter()
            .filter(|person| filter.matches(person))
            .cloned()
            .collect())
    }

    /// Crew who can take another task
    pub fn available(&self) -> AppResult<Vec<Personnel>> {
        Ok(read_lock(&self.personnel)?
            .iter()
            .filter(|person| person.has_capacity())
            .cloned()
            .collect())
    }

    /// Add a crew member with no tasks, available from `start_date`
    pub fn create(&self, input: NewPersonnel, start_date: NaiveDate) -> AppResult<Personnel> {
        if let Err(e) = validate_new_personnel(&input) {
            tracing::warn!(name = %input.name, "Rejected crew member: {}", e);
            return Err(e.into());
        }

        let person = Personnel {
            id: Uuid::new_v4(),
            name: input.name,
            role: input.role,
            department: input.department,
            shift: input.shift,
            skills: input.skills,
            experience: input.experience,
            current_tasks: 0,
            max_tasks: input.max_tasks,
            availability: Availability::Available,
            start_date,
        };
        write_lock(&self.personnel)?.push(person.clone());

        tracing::info!(id = %person.id, name = %person.name, "Added crew member");
        Ok(person)
    }

    /// Give `id` one more task; refused at the task limit
    pub fn assign_task(&self, id: Uuid) -> AppResult<Personnel> {
        self.modify(id, |person| person.take_task())
    }

    /// Take one task back from `id`
    pub fn unassign_task(&self, id: Uuid) -> AppResult<Personnel> {
        self.modify(id, |person| person.release_task())
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut personnel = write_lock(&self.personnel)?;
        let index = personnel
            .iter()
            .position(|person| person.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Personnel {}", id)))?;
        personnel.remove(index);
        tracing::info!(%id, "Removed crew member");
        Ok(())
    }

    fn modify(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut Personnel) -> Result<(), ValidationError>,
    ) -> AppResult<Personnel> {
        let mut personnel = write_lock(&self.personnel)?;
        let person = personnel
            .iter_mut()
            .find(|person| person.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Personnel {}", id)))?;

        change(person).map_err(|e| {
            tracing::warn!(%id, "Rejected workload change: {}", e);
            AppError::InvalidStateTransition(e.to_string())
        })?;

        tracing::info!(
            %id,
            current_tasks = person.current_tasks,
            availability = %person.availability,
            "Workload updated"
        );
        Ok(person.clone())
    }
}
