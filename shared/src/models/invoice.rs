//! Customer invoice models

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ValidationError;

/// Prefix shared by every invoice number
pub const INVOICE_PREFIX: &str = "INV";

/// Payment state of an invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Overdue,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Paid and cancelled invoices are closed
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Pending, InvoiceStatus::Overdue)
                | (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Cancelled)
                | (InvoiceStatus::Overdue, InvoiceStatus::Paid)
                | (InvoiceStatus::Overdue, InvoiceStatus::Cancelled)
        )
    }

    pub fn advance_to(self, next: InvoiceStatus) -> Result<InvoiceStatus, ValidationError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ValidationError::InvalidInvoiceTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Overdue)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(ValidationError::Unknown {
                kind: "invoice status",
                value: s.to_string(),
            }),
        }
    }
}

/// A sale of finished material to a customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer: String,
    pub material: String,
    /// Tonnes sold
    pub quantity: Decimal,
    pub price_per_tonne: Decimal,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub status: InvoiceStatus,
    /// Weighbridge loads the material came from
    #[serde(default)]
    pub load_ids: Vec<Uuid>,
}

/// Input for raising an invoice
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewInvoice {
    #[validate(length(min = 1, message = "Customer is required"))]
    pub customer: String,
    #[validate(length(min = 1, message = "Material is required"))]
    pub material: String,
    pub quantity: Decimal,
    pub price_per_tonne: Decimal,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub load_ids: Vec<Uuid>,
}

/// Sequence number at the end of an invoice number
fn invoice_sequence(invoice_number: &str) -> Option<u32> {
    invoice_number
        .strip_prefix(INVOICE_PREFIX)?
        .rsplit('-')
        .next()?
        .parse()
        .ok()
}

/// Next number in the `INV-<year>-NNN` series.
///
/// The sequence runs on from the highest number issued in any year.
pub fn next_invoice_number(existing: &[Invoice], at: DateTime<Utc>) -> String {
    let next = existing
        .iter()
        .filter_map(|invoice| invoice_sequence(&invoice.invoice_number))
        .max()
        .unwrap_or(0)
        + 1;
    format!("{}-{}-{:03}", INVOICE_PREFIX, at.year(), next)
}

/// Amounts billed, grouped by payment state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceSummary {
    pub count: usize,
    pub total_amount: Decimal,
    pub outstanding_amount: Decimal,
    pub paid_amount: Decimal,
    pub overdue_count: usize,
}

pub fn summarize_invoices(invoices: &[Invoice]) -> InvoiceSummary {
    invoices
        .iter()
        .filter(|invoice| invoice.status != InvoiceStatus::Cancelled)
        .fold(
            InvoiceSummary {
                count: invoices.len(),
                ..InvoiceSummary::default()
            },
            |mut summary, invoice| {
                summary.total_amount += invoice.amount;
                match invoice.status {
                    InvoiceStatus::Paid => summary.paid_amount += invoice.amount,
                    InvoiceStatus::Overdue => {
                        summary.outstanding_amount += invoice.amount;
                        summary.overdue_count += 1;
                    }
                    _ => summary.outstanding_amount += invoice.amount,
                }
                summary
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn invoice(number: &str, amount: i64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            invoice_number: number.to_string(),
            customer: "Coastal Cement".to_string(),
            material: "Iron Concentrate".to_string(),
            quantity: Decimal::from(10),
            price_per_tonne: Decimal::from(amount / 10),
            amount: Decimal::from(amount),
            date: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
            due_date: None,
            status,
            load_ids: Vec::new(),
        }
    }

    #[test]
    fn test_next_number_follows_highest() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let existing = vec![
            invoice("INV-2024-001", 100, InvoiceStatus::Paid),
            invoice("INV-2024-007", 100, InvoiceStatus::Pending),
            invoice("INV-2024-003", 100, InvoiceStatus::Pending),
        ];
        assert_eq!(next_invoice_number(&existing, at), "INV-2024-008");
        assert_eq!(next_invoice_number(&[], at), "INV-2024-001");
    }

    #[test]
    fn test_sequence_carries_into_new_year() {
        let at = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();
        let existing = vec![invoice("INV-2024-012", 100, InvoiceStatus::Paid)];
        assert_eq!(next_invoice_number(&existing, at), "INV-2025-013");
    }

    #[test]
    fn test_closed_invoices_do_not_reopen() {
        assert!(InvoiceStatus::Pending.can_transition_to(InvoiceStatus::Overdue));
        assert!(InvoiceStatus::Overdue.can_transition_to(InvoiceStatus::Paid));
        assert!(!InvoiceStatus::Paid.can_transition_to(InvoiceStatus::Pending));
        assert!(InvoiceStatus::Cancelled.advance_to(InvoiceStatus::Paid).is_err());
    }

    #[test]
    fn test_status_parses_by_name() {
        assert_eq!("Paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("refunded".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_summary_skips_cancelled() {
        let invoices = vec![
            invoice("INV-2024-001", 1000, InvoiceStatus::Paid),
            invoice("INV-2024-002", 400, InvoiceStatus::Pending),
            invoice("INV-2024-003", 250, InvoiceStatus::Overdue),
            invoice("INV-2024-004", 900, InvoiceStatus::Cancelled),
        ];
        let summary = summarize_invoices(&invoices);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total_amount, Decimal::from(1650));
        assert_eq!(summary.paid_amount, Decimal::from(1000));
        assert_eq!(summary.outstanding_amount, Decimal::from(650));
        assert_eq!(summary.overdue_count, 1);
    }
}
