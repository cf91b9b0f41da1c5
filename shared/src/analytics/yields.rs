//! Product yield estimation

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Chemistry, ProductClass, ProductYields, RevenueLine};
use crate::parameters::{RevenueModel, YieldModel};

impl YieldModel {
    /// Iron recovery in percent, capped
    pub fn iron_recovery(&self, iron: Decimal) -> Decimal {
        (self.iron_recovery_base + (iron - self.iron_reference) * self.iron_recovery_slope)
            .min(self.iron_recovery_cap)
    }

    /// Aggregate yield in percent, capped
    pub fn aggregate_yield(&self, calcium: Decimal) -> Decimal {
        (self.aggregate_yield_base + calcium / self.calcium_reference * self.aggregate_yield_slope)
            .min(self.aggregate_yield_cap)
    }

    /// Output tonnages for `weight` tonnes of input.
    ///
    /// Each class is an independent fraction of the input; the classes are
    /// not required to sum to the input weight.
    pub fn compute(&self, chemistry: &Chemistry, weight: Decimal) -> ProductYields {
        ProductYields {
            primary_product: self.iron_recovery(chemistry.iron) / Decimal::ONE_HUNDRED * weight,
            aggregate_product: self.aggregate_yield(chemistry.calcium) / Decimal::ONE_HUNDRED
                * weight,
            byproducts: weight * self.byproduct_fraction,
            waste: weight * self.waste_fraction,
        }
    }
}

impl RevenueModel {
    /// Revenue per product class given the chemistry price per tonne
    pub fn breakdown(
        &self,
        yields: &ProductYields,
        price_per_tonne: Decimal,
    ) -> BTreeMap<ProductClass, RevenueLine> {
        let line = |quantity: Decimal, unit_price: Decimal| RevenueLine {
            quantity,
            unit_price,
            revenue: quantity * unit_price,
        };
        BTreeMap::from([
            (
                ProductClass::PrimaryProduct,
                line(yields.primary_product, price_per_tonne),
            ),
            (
                ProductClass::AggregateProduct,
                line(
                    yields.aggregate_product,
                    price_per_tonne * self.aggregate_price_factor,
                ),
            ),
            (
                ProductClass::Byproducts,
                line(yields.byproducts, self.byproduct_price),
            ),
        ])
    }
}

/// Yields under the default yield model
pub fn compute_yields(chemistry: &Chemistry, weight: Decimal) -> ProductYields {
    YieldModel::default().compute(chemistry, weight)
}
