//! Validation utilities for the Slag Plant Operations Platform
//!
//! Malformed records are rejected here, at the ingestion boundary, instead of
//! being silently zeroed further down.

use rust_decimal::Decimal;
use validator::Validate;

use crate::error::ValidationError;
use crate::models::{Chemistry, Element, NewInvoice, NewLoad, NewPersonnel};

// ============================================================================
// Load Validations
// ============================================================================

/// Weighbridge weight must be strictly positive
pub fn validate_weight(weight: Decimal) -> Result<(), ValidationError> {
    if weight <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field: "weight" });
    }
    Ok(())
}

/// A single element percentage must lie in 0-100
pub fn validate_percentage(element: Element, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::PercentageOutOfRange { element, value });
    }
    Ok(())
}

/// Every measured element must be a valid percentage.
///
/// The sum across elements is not checked.
pub fn validate_chemistry_values(chemistry: &Chemistry) -> Result<(), ValidationError> {
    chemistry
        .elements()
        .try_for_each(|(element, value)| validate_percentage(element, value))
}

/// Full weighbridge submission check
pub fn validate_new_load(input: &NewLoad) -> Result<(), ValidationError> {
    if let Err(errors) = input.validate() {
        let field = errors
            .field_errors()
            .into_keys()
            .min()
            .unwrap_or("load");
        return Err(ValidationError::Missing { field });
    }
    validate_weight(input.weight)?;
    validate_chemistry_values(&input.chemistry)
}

// ============================================================================
// Personnel and Invoice Validations
// ============================================================================

/// Crew member needs a name, a role and room for at least one task
pub fn validate_new_personnel(input: &NewPersonnel) -> Result<(), ValidationError> {
    if let Err(errors) = input.validate() {
        let field = errors
            .field_errors()
            .into_keys()
            .min()
            .unwrap_or("personnel");
        return Err(ValidationError::Missing { field });
    }
    if input.experience < Decimal::ZERO {
        return Err(ValidationError::Negative { field: "experience" });
    }
    Ok(())
}

/// Invoices bill a positive quantity at a non-negative price
pub fn validate_new_invoice(input: &NewInvoice) -> Result<(), ValidationError> {
    if let Err(errors) = input.validate() {
        let field = errors
            .field_errors()
            .into_keys()
            .min()
            .unwrap_or("invoice");
        return Err(ValidationError::Missing { field });
    }
    if input.quantity <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field: "quantity" });
    }
    if input.price_per_tonne < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "price_per_tonne",
        });
    }
    Ok(())
}

// ============================================================================
// Model Input Validations
// ============================================================================

/// Inputs the models accept: zero weight is allowed, negatives are not
pub fn validate_model_input(weight: Decimal, chemistry: &Chemistry) -> Result<(), ValidationError> {
    if weight < Decimal::ZERO {
        return Err(ValidationError::Negative { field: "weight" });
    }
    chemistry.elements().try_for_each(|(element, value)| {
        if value < Decimal::ZERO {
            Err(ValidationError::PercentageOutOfRange { element, value })
        } else {
            Ok(())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chemistry() -> Chemistry {
        Chemistry {
            iron: Decimal::from(47),
            calcium: Decimal::from(33),
            silicon: Some(Decimal::from(15)),
            aluminum: Some(Decimal::from(4)),
            magnesium: Some(Decimal::new(25, 1)),
        }
    }

    fn new_load() -> NewLoad {
        NewLoad {
            load_number: None,
            weight: Decimal::new(245, 1),
            source: "Blast Furnace 2".to_string(),
            driver: "M. Okafor".to_string(),
            truck_number: "TR-118".to_string(),
            chemistry: chemistry(),
        }
    }

    // ========================================================================
    // Load Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(Decimal::new(1, 2)).is_ok());
        assert!(validate_weight(Decimal::ZERO).is_err());
        assert!(validate_weight(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_chemistry_values_valid() {
        assert!(validate_chemistry_values(&chemistry()).is_ok());
    }

    #[test]
    fn test_validate_chemistry_values_rejects_negative_optional() {
        let mut chem = chemistry();
        chem.aluminum = Some(Decimal::from(-1));
        assert_eq!(
            validate_chemistry_values(&chem),
            Err(ValidationError::PercentageOutOfRange {
                element: Element::Aluminum,
                value: Decimal::from(-1),
            })
        );
    }

    #[test]
    fn test_validate_chemistry_values_rejects_over_hundred() {
        let mut chem = chemistry();
        chem.iron = Decimal::from(101);
        assert!(validate_chemistry_values(&chem).is_err());
    }

    #[test]
    fn test_chemistry_sum_is_not_checked() {
        let chem = Chemistry {
            iron: Decimal::from(80),
            calcium: Decimal::from(80),
            silicon: None,
            aluminum: None,
            magnesium: None,
        };
        assert!(validate_chemistry_values(&chem).is_ok());
    }

    #[test]
    fn test_validate_new_load_valid() {
        assert!(validate_new_load(&new_load()).is_ok());
    }

    #[test]
    fn test_validate_new_load_missing_driver() {
        let mut input = new_load();
        input.driver = String::new();
        assert_eq!(
            validate_new_load(&input),
            Err(ValidationError::Missing { field: "driver" })
        );
    }

    #[test]
    fn test_validate_new_load_zero_weight() {
        let mut input = new_load();
        input.weight = Decimal::ZERO;
        assert_eq!(
            validate_new_load(&input),
            Err(ValidationError::NotPositive { field: "weight" })
        );
    }

    // ========================================================================
    // Personnel and Invoice Validation Tests
    // ========================================================================

    fn new_personnel() -> NewPersonnel {
        NewPersonnel {
            name: "R. Tan".to_string(),
            role: "Maintenance".to_string(),
            department: "Engineering".to_string(),
            shift: "Day".to_string(),
            skills: vec!["Hydraulics".to_string()],
            experience: Decimal::from(6),
            max_tasks: 3,
        }
    }

    fn new_invoice() -> NewInvoice {
        NewInvoice {
            customer: "Coastal Cement".to_string(),
            material: "Aggregate".to_string(),
            quantity: Decimal::from(120),
            price_per_tonne: Decimal::new(4425, 2),
            due_date: None,
            load_ids: Vec::new(),
        }
    }

    #[test]
    fn test_validate_new_personnel() {
        assert!(validate_new_personnel(&new_personnel()).is_ok());

        let mut no_capacity = new_personnel();
        no_capacity.max_tasks = 0;
        assert_eq!(
            validate_new_personnel(&no_capacity),
            Err(ValidationError::Missing { field: "max_tasks" })
        );

        let mut unnamed = new_personnel();
        unnamed.name = String::new();
        assert_eq!(
            validate_new_personnel(&unnamed),
            Err(ValidationError::Missing { field: "name" })
        );
    }

    #[test]
    fn test_validate_new_invoice() {
        assert!(validate_new_invoice(&new_invoice()).is_ok());

        let mut empty = new_invoice();
        empty.quantity = Decimal::ZERO;
        assert_eq!(
            validate_new_invoice(&empty),
            Err(ValidationError::NotPositive { field: "quantity" })
        );

        let mut anonymous = new_invoice();
        anonymous.customer = String::new();
        assert_eq!(
            validate_new_invoice(&anonymous),
            Err(ValidationError::Missing { field: "customer" })
        );
    }

    // ========================================================================
    // Model Input Validation Tests
    // ========================================================================

    #[test]
    fn test_model_input_allows_zero_weight() {
        assert!(validate_model_input(Decimal::ZERO, &chemistry()).is_ok());
    }

    #[test]
    fn test_model_input_rejects_negative_weight() {
        assert_eq!(
            validate_model_input(Decimal::from(-1), &chemistry()),
            Err(ValidationError::Negative { field: "weight" })
        );
    }
}
