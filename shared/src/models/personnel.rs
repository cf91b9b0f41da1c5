//! Plant personnel and workload models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ValidationError;

/// Whether a person can take on more work
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Busy,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member of the plant crew
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Personnel {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub department: String,
    pub shift: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Years of experience
    pub experience: Decimal,
    pub current_tasks: u32,
    pub max_tasks: u32,
    pub availability: Availability,
    pub start_date: NaiveDate,
}

impl Personnel {
    /// Available and below the task limit
    pub fn has_capacity(&self) -> bool {
        self.availability == Availability::Available && self.current_tasks < self.max_tasks
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Take one more task, turning busy on reaching the limit
    pub fn take_task(&mut self) -> Result<(), ValidationError> {
        if self.current_tasks >= self.max_tasks {
            return Err(ValidationError::AtCapacity {
                name: self.name.clone(),
            });
        }
        self.current_tasks += 1;
        self.availability = if self.current_tasks >= self.max_tasks {
            Availability::Busy
        } else {
            Availability::Available
        };
        Ok(())
    }

    /// Hand back one task; the person is available again afterwards
    pub fn release_task(&mut self) -> Result<(), ValidationError> {
        if self.current_tasks == 0 {
            return Err(ValidationError::NoAssignedTasks {
                name: self.name.clone(),
            });
        }
        self.current_tasks -= 1;
        self.availability = Availability::Available;
        Ok(())
    }
}

/// Input for adding a crew member
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPersonnel {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Decimal,
    #[validate(range(min = 1, message = "Max tasks must be at least 1"))]
    pub max_tasks: u32,
}

/// Head counts and task load across the crew
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkloadStatistics {
    pub total: usize,
    pub available: usize,
    pub busy: usize,
    pub by_role: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
    pub by_shift: BTreeMap<String, usize>,
    /// `None` for an empty crew
    pub average_experience: Option<Decimal>,
    pub total_tasks: u32,
    pub max_capacity: u32,
}

pub fn workload_statistics(personnel: &[Personnel]) -> WorkloadStatistics {
    let mut stats = WorkloadStatistics {
        total: personnel.len(),
        ..WorkloadStatistics::default()
    };

    let mut experience = Decimal::ZERO;
    for person in personnel {
        match person.availability {
            Availability::Available => stats.available += 1,
            Availability::Busy => stats.busy += 1,
        }
        *stats.by_role.entry(person.role.clone()).or_default() += 1;
        *stats.by_department.entry(person.department.clone()).or_default() += 1;
        *stats.by_shift.entry(person.shift.clone()).or_default() += 1;
        stats.total_tasks += person.current_tasks;
        stats.max_capacity += person.max_tasks;
        experience += person.experience;
    }
    stats.average_experience = experience.checked_div(Decimal::from(personnel.len()));

    stats
}
