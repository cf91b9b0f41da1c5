//! Plant-wide chemistry quality status

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profit::percent_of;
use super::tolerance::ToleranceStatus;
use crate::models::Load;
use crate::parameters::ToleranceTable;

/// Share of checks at or above which quality is excellent
pub const EXCELLENT_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
/// Share of checks at or above which quality is good
pub const GOOD_PERCENT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Excellent,
    Good,
    NeedsAttention,
    /// No element checks were made
    Unknown,
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityLevel::Excellent => write!(f, "Excellent"),
            QualityLevel::Good => write!(f, "Good"),
            QualityLevel::NeedsAttention => write!(f, "Needs Attention"),
            QualityLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Classify a within-tolerance percentage
pub fn classify_quality(percentage: Option<Decimal>) -> QualityLevel {
    match percentage {
        Some(p) if p >= EXCELLENT_PERCENT => QualityLevel::Excellent,
        Some(p) if p >= GOOD_PERCENT => QualityLevel::Good,
        Some(_) => QualityLevel::NeedsAttention,
        None => QualityLevel::Unknown,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityStatus {
    pub level: QualityLevel,
    pub percentage: Option<Decimal>,
    pub within_tolerance: usize,
    pub total_checks: usize,
}

/// Share of element checks within tolerance across `loads`
pub fn quality_status(loads: &[Load], tolerance: &ToleranceTable) -> QualityStatus {
    let (within_tolerance, total_checks) = loads
        .iter()
        .flat_map(|load| tolerance.evaluate(&load.chemistry).into_values())
        .fold((0usize, 0usize), |(within, total), check| {
            let hit = usize::from(check.status == ToleranceStatus::Within);
            (within + hit, total + 1)
        });

    let percentage = percent_of(Decimal::from(within_tolerance), Decimal::from(total_checks));

    QualityStatus {
        level: classify_quality(percentage),
        percentage,
        within_tolerance,
        total_checks,
    }
}
