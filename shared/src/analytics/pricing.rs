//! Chemistry-based pricing

use rust_decimal::Decimal;

use crate::models::Chemistry;
use crate::parameters::PricingModel;

impl PricingModel {
    /// Base price per tonne.
    ///
    /// Iron and calcium above their thresholds earn a bonus, aluminum and
    /// silicon above theirs are penalised. Unmeasured impurities carry no
    /// penalty. Never below the floor price.
    pub fn price(&self, chemistry: &Chemistry) -> Decimal {
        let excess = |value: Decimal, threshold: Decimal| (value - threshold).max(Decimal::ZERO);

        let iron_bonus = excess(chemistry.iron, self.iron_threshold) * self.iron_bonus;
        let calcium_bonus = excess(chemistry.calcium, self.calcium_threshold) * self.calcium_bonus;
        let aluminum_penalty = chemistry
            .aluminum
            .map(|al| excess(al, self.aluminum_threshold) * self.aluminum_penalty)
            .unwrap_or_default();
        let silicon_penalty = chemistry
            .silicon
            .map(|si| excess(si, self.silicon_threshold) * self.silicon_penalty)
            .unwrap_or_default();

        (self.base_price + iron_bonus + calcium_bonus - aluminum_penalty - silicon_penalty)
            .max(self.floor_price)
    }
}

/// Price per tonne under the default pricing model
pub fn price_from_chemistry(chemistry: &Chemistry) -> Decimal {
    PricingModel::default().price(chemistry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chemistry(iron: Decimal, calcium: Decimal, silicon: Decimal, aluminum: Decimal) -> Chemistry {
        Chemistry {
            iron,
            calcium,
            silicon: Some(silicon),
            aluminum: Some(aluminum),
            magnesium: Some(Decimal::new(25, 1)),
        }
    }

    #[test]
    fn test_reference_sample_price() {
        let chem = chemistry(
            Decimal::from(47),
            Decimal::from(33),
            Decimal::from(15),
            Decimal::from(4),
        );
        // 85 + 7 * 2.8 + 3 * 1.5
        assert_eq!(price_from_chemistry(&chem), Decimal::new(1091, 1));
    }

    #[test]
    fn test_penalties_apply_above_threshold() {
        let chem = chemistry(
            Decimal::from(40),
            Decimal::from(30),
            Decimal::from(18),
            Decimal::from(7),
        );
        // 85 - 2 * 3.0 - 2 * 2.0
        assert_eq!(price_from_chemistry(&chem), Decimal::from(75));
    }

    #[test]
    fn test_price_is_floored() {
        let chem = chemistry(
            Decimal::from(20),
            Decimal::from(10),
            Decimal::from(40),
            Decimal::from(30),
        );
        assert_eq!(price_from_chemistry(&chem), Decimal::from(70));
    }

    #[test]
    fn test_unmeasured_impurities_carry_no_penalty() {
        let chem = Chemistry::new(Decimal::from(40), Decimal::from(30));
        assert_eq!(price_from_chemistry(&chem), Decimal::from(85));
    }

    fn percent() -> impl Strategy<Value = Decimal> {
        (0u32..=1000).prop_map(|tenths| Decimal::new(i64::from(tenths), 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn price_never_below_floor(fe in percent(), ca in percent(), si in percent(), al in percent()) {
            prop_assert!(price_from_chemistry(&chemistry(fe, ca, si, al)) >= Decimal::from(70));
        }

        #[test]
        fn price_non_decreasing_in_iron_and_calcium(
            fe in percent(), ca in percent(), si in percent(), al in percent(), step in percent(),
        ) {
            let base = price_from_chemistry(&chemistry(fe, ca, si, al));
            prop_assert!(price_from_chemistry(&chemistry(fe + step, ca, si, al)) >= base);
            prop_assert!(price_from_chemistry(&chemistry(fe, ca + step, si, al)) >= base);
        }

        #[test]
        fn price_non_increasing_in_impurities(
            fe in percent(), ca in percent(), si in percent(), al in percent(), step in percent(),
        ) {
            let base = price_from_chemistry(&chemistry(fe, ca, si, al));
            prop_assert!(price_from_chemistry(&chemistry(fe, ca, si + step, al)) <= base);
            prop_assert!(price_from_chemistry(&chemistry(fe, ca, si, al + step)) <= base);
        }
    }
}
