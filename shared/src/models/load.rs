//! Weighbridge load models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Chemistry;
use crate::error::ValidationError;

/// Processing status of a load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Pending,
    Processing,
    Processed,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Pending => "pending",
            LoadStatus::Processing => "processing",
            LoadStatus::Processed => "processed",
        }
    }

    /// Status advances one step at a time and never goes back
    pub fn can_transition_to(&self, next: LoadStatus) -> bool {
        matches!(
            (self, next),
            (LoadStatus::Pending, LoadStatus::Processing)
                | (LoadStatus::Processing, LoadStatus::Processed)
        )
    }

    pub fn advance_to(self, next: LoadStatus) -> Result<LoadStatus, ValidationError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ValidationError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(LoadStatus::Pending),
            "processing" => Ok(LoadStatus::Processing),
            "processed" => Ok(LoadStatus::Processed),
            _ => Err(ValidationError::Unknown {
                kind: "load status",
                value: s.to_string(),
            }),
        }
    }
}

/// One truckload recorded at the weighbridge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Load {
    pub id: Uuid,
    pub load_number: String,
    /// Net weight in tonnes
    pub weight: Decimal,
    pub source: String,
    pub driver: String,
    pub truck_number: String,
    pub chemistry: Chemistry,
    pub arrival_time: DateTime<Utc>,
    pub status: LoadStatus,
}

/// Weighbridge submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewLoad {
    /// Assigned by the repository when blank
    #[serde(default)]
    pub load_number: Option<String>,
    pub weight: Decimal,
    #[validate(length(min = 1, message = "Source is required"))]
    pub source: String,
    #[validate(length(min = 1, message = "Driver is required"))]
    pub driver: String,
    #[validate(length(min = 1, message = "Truck number is required"))]
    pub truck_number: String,
    pub chemistry: Chemistry,
}
