//! Per-load profit computation

use rust_decimal::Decimal;

use crate::error::CalculationError;
use crate::models::{Load, ProfitRecord};
use crate::parameters::PlantParameters;
use crate::validation::validate_model_input;

impl PlantParameters {
    /// Build the profit record for one load.
    ///
    /// Revenue is the chemistry price times the input weight. The revenue
    /// breakdown prices the estimated yields per product class and is
    /// reported alongside, not summed into, the total.
    pub fn compute_profit(&self, load: &Load) -> Result<ProfitRecord, CalculationError> {
        validate_model_input(load.weight, &load.chemistry)?;

        let price_per_tonne = self.pricing.price(&load.chemistry);
        let yields = self.yields.compute(&load.chemistry, load.weight);
        let costs = self.cost_rates.compute(load.weight);

        let total_revenue = price_per_tonne * load.weight;
        let profit = total_revenue - costs.total_cost;

        Ok(ProfitRecord {
            load_id: load.id,
            load_number: load.load_number.clone(),
            source: load.source.clone(),
            date: load.arrival_time,
            weight: load.weight,
            price_per_tonne,
            total_revenue,
            total_cost: costs.total_cost,
            profit,
            profit_per_tonne: profit.checked_div(load.weight),
            profit_margin: percent_of(profit, total_revenue),
            processing_costs: costs.processing_costs,
            operational_costs: costs.operational_costs,
            revenue_breakdown: self.revenue.breakdown(&yields, price_per_tonne),
            yields,
        })
    }

    /// Profit records for every load, failing on the first invalid one
    pub fn compute_profits(&self, loads: &[Load]) -> Result<Vec<ProfitRecord>, CalculationError> {
        loads.iter().map(|load| self.compute_profit(load)).collect()
    }
}

/// Profit record under the default tables
pub fn compute_profit(load: &Load) -> Result<ProfitRecord, CalculationError> {
    PlantParameters::default().compute_profit(load)
}

/// `part / whole * 100`, `None` when `whole` is zero
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole).map(|ratio| ratio * Decimal::ONE_HUNDRED)
}
