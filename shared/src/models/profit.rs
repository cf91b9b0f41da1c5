//! Profit analytics models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Physical processing stages billed per tonne
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStage {
    Crushing,
    Screening,
    Washing,
    Secondary,
}

impl ProcessingStage {
    pub const ALL: [ProcessingStage; 4] = [
        ProcessingStage::Crushing,
        ProcessingStage::Screening,
        ProcessingStage::Washing,
        ProcessingStage::Secondary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStage::Crushing => "crushing",
            ProcessingStage::Screening => "screening",
            ProcessingStage::Washing => "washing",
            ProcessingStage::Secondary => "secondary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProcessingStage::Crushing => "Primary crushing and breaking",
            ProcessingStage::Screening => "Size classification and sorting",
            ProcessingStage::Washing => "Cleaning and impurity removal",
            ProcessingStage::Secondary => "Secondary processing",
        }
    }
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProcessingStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crushing" => Ok(ProcessingStage::Crushing),
            "screening" => Ok(ProcessingStage::Screening),
            "washing" => Ok(ProcessingStage::Washing),
            "secondary" => Ok(ProcessingStage::Secondary),
            _ => Err(ValidationError::Unknown {
                kind: "processing stage",
                value: s.to_string(),
            }),
        }
    }
}

/// Plant overheads billed per tonne
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OperationalCategory {
    Labor,
    Maintenance,
    Utilities,
    Overhead,
}

impl OperationalCategory {
    pub const ALL: [OperationalCategory; 4] = [
        OperationalCategory::Labor,
        OperationalCategory::Maintenance,
        OperationalCategory::Utilities,
        OperationalCategory::Overhead,
    ];
}

/// Saleable output classes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProductClass {
    PrimaryProduct,
    AggregateProduct,
    Byproducts,
}

/// Cost of one stage or category for a load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageCost {
    pub cost: Decimal,
    pub cost_per_tonne: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-load cost model output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadCosts {
    pub processing_costs: BTreeMap<ProcessingStage, StageCost>,
    pub operational_costs: BTreeMap<OperationalCategory, StageCost>,
    pub total_cost: Decimal,
}

/// Estimated output tonnages for a load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductYields {
    pub primary_product: Decimal,
    pub aggregate_product: Decimal,
    pub byproducts: Decimal,
    pub waste: Decimal,
}

/// Revenue of one product class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueLine {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub revenue: Decimal,
}

/// Financial summary of one load. Derived on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitRecord {
    pub load_id: Uuid,
    pub load_number: String,
    pub source: String,
    pub date: DateTime<Utc>,
    pub weight: Decimal,
    pub price_per_tonne: Decimal,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    /// `None` for a zero-weight load
    pub profit_per_tonne: Option<Decimal>,
    /// Percent of revenue, `None` when revenue is zero
    pub profit_margin: Option<Decimal>,
    pub processing_costs: BTreeMap<ProcessingStage, StageCost>,
    pub operational_costs: BTreeMap<OperationalCategory, StageCost>,
    pub revenue_breakdown: BTreeMap<ProductClass, RevenueLine>,
    pub yields: ProductYields,
}

/// Processing cost totals across records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingCostTotals {
    pub total: Decimal,
    pub stages: BTreeMap<ProcessingStage, Decimal>,
}

/// Operational cost totals across records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationalCostTotals {
    pub total: Decimal,
    pub categories: BTreeMap<OperationalCategory, Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub processing: ProcessingCostTotals,
    pub operational: OperationalCostTotals,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueBreakdown {
    pub primary_product: Decimal,
    pub aggregate_product: Decimal,
    pub byproducts: Decimal,
    pub total: Decimal,
}

/// Time-windowed aggregation of profit records
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendBucket {
    pub profit: Decimal,
    pub revenue: Decimal,
    pub cost: Decimal,
    /// Tonnes
    pub volume: Decimal,
    pub count: u32,
    pub avg_profit_per_tonne: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
}

/// Headline figures for a set of records
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfitSummary {
    pub load_count: usize,
    pub total_profit: Decimal,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_volume: Decimal,
    pub avg_profit_per_tonne: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
}

/// Share of a load's cost taken by one processing stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageImpact {
    pub load_id: Uuid,
    pub load_number: String,
    pub date: DateTime<Utc>,
    pub stage: ProcessingStage,
    pub stage_cost: Option<StageCost>,
    pub total_cost: Decimal,
    /// Percent of total cost, `None` when the stage is absent or cost is zero
    pub profit_impact: Option<Decimal>,
}

/// Everything the profit dashboard renders for a set of records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitAggregate {
    pub summary: ProfitSummary,
    pub cost_breakdown: CostBreakdown,
    pub revenue_breakdown: RevenueBreakdown,
    pub trends: BTreeMap<String, TrendBucket>,
}
