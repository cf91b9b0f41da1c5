//! Processing and operational cost model

use rust_decimal::Decimal;

use crate::models::{LoadCosts, StageCost};
use crate::parameters::CostRates;

impl CostRates {
    /// Costs for `weight` tonnes. Linear in weight.
    pub fn compute(&self, weight: Decimal) -> LoadCosts {
        let processing_costs = self
            .processing
            .iter()
            .map(|(stage, rate)| {
                let cost = StageCost {
                    cost: rate * weight,
                    cost_per_tonne: *rate,
                    description: Some(stage.description().to_string()),
                };
                (*stage, cost)
            })
            .collect::<std::collections::BTreeMap<_, _>>();

        let operational_costs = self
            .operational
            .iter()
            .map(|(category, rate)| {
                let cost = StageCost {
                    cost: rate * weight,
                    cost_per_tonne: *rate,
                    description: None,
                };
                (*category, cost)
            })
            .collect::<std::collections::BTreeMap<_, _>>();

        let total_cost = processing_costs
            .values()
            .chain(operational_costs.values())
            .map(|c| c.cost)
            .sum();

        LoadCosts {
            processing_costs,
            operational_costs,
            total_cost,
        }
    }

    /// Sum of every per-tonne rate
    pub fn total_rate(&self) -> Decimal {
        self.processing.values().chain(self.operational.values()).sum()
    }
}

/// Costs under the default rate table
pub fn compute_costs(weight: Decimal) -> LoadCosts {
    CostRates::default().compute(weight)
}
