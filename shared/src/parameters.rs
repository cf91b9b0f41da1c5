//! Plant-wide configuration tables
//!
//! Every coefficient the calculation core uses lives here with its default.
//! The backend may override any of them from its configuration file; the
//! browser uses the defaults.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Element, OperationalCategory, ProcessingStage};

/// Acceptable band for one element's percentage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ToleranceRange {
    pub min: Decimal,
    pub max: Decimal,
    pub target: Decimal,
}

impl ToleranceRange {
    pub fn new(min: Decimal, max: Decimal, target: Decimal) -> Self {
        Self { min, max, target }
    }
}

/// Tolerance bands per element. Global, not per-load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ToleranceTable(pub BTreeMap<Element, ToleranceRange>);

impl ToleranceTable {
    pub fn get(&self, element: Element) -> Option<&ToleranceRange> {
        self.0.get(&element)
    }
}

impl Default for ToleranceTable {
    fn default() -> Self {
        let band = |min: i64, max: i64, target: i64, scale: u32| {
            ToleranceRange::new(
                Decimal::new(min, scale),
                Decimal::new(max, scale),
                Decimal::new(target, scale),
            )
        };
        Self(BTreeMap::from([
            (Element::Iron, band(42, 52, 47, 0)),
            (Element::Calcium, band(28, 38, 33, 0)),
            (Element::Silicon, band(12, 18, 15, 0)),
            (Element::Aluminum, band(2, 6, 4, 0)),
            (Element::Magnesium, band(15, 35, 25, 1)),
        ]))
    }
}

/// Chemistry-driven base price per tonne
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingModel {
    pub base_price: Decimal,
    pub floor_price: Decimal,
    pub iron_threshold: Decimal,
    pub iron_bonus: Decimal,
    pub calcium_threshold: Decimal,
    pub calcium_bonus: Decimal,
    pub aluminum_threshold: Decimal,
    pub aluminum_penalty: Decimal,
    pub silicon_threshold: Decimal,
    pub silicon_penalty: Decimal,
}

impl Default for PricingModel {
    fn default() -> Self {
        Self {
            base_price: Decimal::from(85),
            floor_price: Decimal::from(70),
            iron_threshold: Decimal::from(40),
            iron_bonus: Decimal::new(28, 1),
            calcium_threshold: Decimal::from(30),
            calcium_bonus: Decimal::new(15, 1),
            aluminum_threshold: Decimal::from(5),
            aluminum_penalty: Decimal::from(3),
            silicon_threshold: Decimal::from(16),
            silicon_penalty: Decimal::from(2),
        }
    }
}

/// Recovery percentages used to estimate output tonnages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct YieldModel {
    pub iron_recovery_base: Decimal,
    pub iron_reference: Decimal,
    pub iron_recovery_slope: Decimal,
    pub iron_recovery_cap: Decimal,
    pub aggregate_yield_base: Decimal,
    pub calcium_reference: Decimal,
    pub aggregate_yield_slope: Decimal,
    pub aggregate_yield_cap: Decimal,
    /// Fraction of input weight
    pub byproduct_fraction: Decimal,
    /// Fraction of input weight
    pub waste_fraction: Decimal,
}

impl Default for YieldModel {
    fn default() -> Self {
        Self {
            iron_recovery_base: Decimal::from(85),
            iron_reference: Decimal::from(40),
            iron_recovery_slope: Decimal::new(5, 1),
            iron_recovery_cap: Decimal::from(95),
            aggregate_yield_base: Decimal::from(80),
            calcium_reference: Decimal::from(35),
            aggregate_yield_slope: Decimal::from(10),
            aggregate_yield_cap: Decimal::from(90),
            byproduct_fraction: Decimal::new(5, 2),
            waste_fraction: Decimal::new(2, 2),
        }
    }
}

/// Unit prices applied to product yields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevenueModel {
    /// Aggregate sells at this fraction of the primary price
    pub aggregate_price_factor: Decimal,
    pub byproduct_price: Decimal,
}

impl Default for RevenueModel {
    fn default() -> Self {
        Self {
            aggregate_price_factor: Decimal::new(7, 1),
            byproduct_price: Decimal::from(35),
        }
    }
}

/// Per-tonne cost rates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CostRates {
    pub processing: BTreeMap<ProcessingStage, Decimal>,
    pub operational: BTreeMap<OperationalCategory, Decimal>,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            processing: BTreeMap::from([
                (ProcessingStage::Crushing, Decimal::from(15)),
                (ProcessingStage::Screening, Decimal::from(12)),
                (ProcessingStage::Washing, Decimal::from(8)),
                (ProcessingStage::Secondary, Decimal::from(10)),
            ]),
            operational: BTreeMap::from([
                (OperationalCategory::Labor, Decimal::from(18)),
                (OperationalCategory::Maintenance, Decimal::new(85, 1)),
                (OperationalCategory::Utilities, Decimal::from(12)),
                (OperationalCategory::Overhead, Decimal::new(155, 1)),
            ]),
        }
    }
}

/// Service intervals and job durations per equipment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaintenanceTables {
    /// Running hours between services
    pub intervals: BTreeMap<String, Decimal>,
    /// Job length in hours
    pub durations: BTreeMap<String, Decimal>,
    pub default_interval: Decimal,
    pub default_duration: Decimal,
    pub default_daily_usage: Decimal,
}

impl MaintenanceTables {
    /// Service interval for `equipment_type`, matched case-insensitively
    pub fn interval_for(&self, equipment_type: &str) -> Decimal {
        lookup(&self.intervals, equipment_type)
            .filter(|hours| *hours > Decimal::ZERO)
            .unwrap_or(self.default_interval)
    }

    pub fn duration_for(&self, equipment_type: &str) -> Decimal {
        lookup(&self.durations, equipment_type).unwrap_or(self.default_duration)
    }
}

fn lookup(table: &BTreeMap<String, Decimal>, equipment_type: &str) -> Option<Decimal> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(equipment_type))
        .map(|(_, value)| *value)
}

impl Default for MaintenanceTables {
    fn default() -> Self {
        let table = |entries: [(&str, i64); 5]| -> BTreeMap<String, Decimal> {
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), Decimal::from(value)))
                .collect()
        };
        Self {
            intervals: table([
                ("Crusher", 500),
                ("Screen", 400),
                ("Conveyor", 750),
                ("Grinder", 600),
                ("Magnetic Separator", 1000),
            ]),
            durations: table([
                ("Crusher", 4),
                ("Screen", 3),
                ("Conveyor", 2),
                ("Grinder", 3),
                ("Magnetic Separator", 5),
            ]),
            default_interval: Decimal::from(500),
            default_duration: Decimal::from(3),
            default_daily_usage: Decimal::from(8),
        }
    }
}

/// All calculation tables for the plant
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlantParameters {
    pub tolerance: ToleranceTable,
    pub pricing: PricingModel,
    pub yields: YieldModel,
    pub revenue: RevenueModel,
    pub cost_rates: CostRates,
    pub maintenance: MaintenanceTables,
}
