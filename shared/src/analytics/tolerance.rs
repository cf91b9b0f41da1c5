//! Chemistry tolerance evaluation

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Chemistry, Element};
use crate::parameters::{ToleranceRange, ToleranceTable};

/// Position of a value relative to its tolerance band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceStatus {
    Within,
    Low,
    High,
}

impl ToleranceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToleranceStatus::Within => "within",
            ToleranceStatus::Low => "low",
            ToleranceStatus::High => "high",
        }
    }
}

/// Result of checking one element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementCheck {
    pub value: Decimal,
    pub status: ToleranceStatus,
    /// Absolute distance from target
    pub deviation: Decimal,
    pub target: Decimal,
    pub range: ToleranceRange,
}

impl ToleranceRange {
    /// Classify `value` against this band
    pub fn classify(&self, value: Decimal) -> ToleranceStatus {
        if value >= self.min && value <= self.max {
            ToleranceStatus::Within
        } else if value < self.min {
            ToleranceStatus::Low
        } else {
            ToleranceStatus::High
        }
    }

    pub fn check(&self, value: Decimal) -> ElementCheck {
        ElementCheck {
            value,
            status: self.classify(value),
            deviation: (value - self.target).abs(),
            target: self.target,
            range: *self,
        }
    }
}

impl ToleranceTable {
    /// Check every element present both in `chemistry` and in this table
    pub fn evaluate(&self, chemistry: &Chemistry) -> BTreeMap<Element, ElementCheck> {
        chemistry
            .elements()
            .filter_map(|(element, value)| {
                self.get(element).map(|range| (element, range.check(value)))
            })
            .collect()
    }
}

/// Evaluate `chemistry` against the default tolerance table
pub fn validate_chemistry(chemistry: &Chemistry) -> BTreeMap<Element, ElementCheck> {
    ToleranceTable::default().evaluate(chemistry)
}
