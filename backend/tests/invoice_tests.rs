//! Invoice ledger tests
//!
//! Tests for customer invoices including:
//! - Sequential invoice numbering
//! - Status and customer lookups
//! - Payment state changes and overdue flagging

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{InvoiceStatus, NewInvoice};
use slag_plant_backend::repositories::InvoiceRepository;
use slag_plant_backend::services::InvoiceService;
use slag_plant_backend::AppError;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
}

fn fixture_repo() -> Arc<InvoiceRepository> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/invoices.json");
    Arc::new(InvoiceRepository::from_file(&path).unwrap())
}

fn new_invoice(customer: &str, quantity: &str) -> NewInvoice {
    NewInvoice {
        customer: customer.to_string(),
        material: "Aggregate".to_string(),
        quantity: dec(quantity),
        price_per_tonne: dec("44.50"),
        due_date: Some(at(2, 28)),
        load_ids: Vec::new(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_create_numbers_after_fixture() {
        let repo = fixture_repo();
        let invoice = repo.create(new_invoice("Ridgeline Construction", "30"), at(2, 1)).unwrap();

        assert_eq!(invoice.invoice_number, "INV-2024-005");
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.amount, dec("1335"));
        assert_eq!(invoice.date, at(2, 1));

        let next = repo.create(new_invoice("Coastal Cement", "10"), at(2, 2)).unwrap();
        assert_eq!(next.invoice_number, "INV-2024-006");
    }

    #[test]
    fn test_first_invoice_is_001() {
        let repo = InvoiceRepository::default();
        let invoice = repo.create(new_invoice("Coastal Cement", "5"), at(3, 1)).unwrap();
        assert_eq!(invoice.invoice_number, "INV-2024-001");
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let repo = InvoiceRepository::default();
        let err = repo.create(new_invoice("Coastal Cement", "0"), at(2, 1)).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = repo.create(new_invoice("", "5"), at(2, 1)).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_customer_search_ignores_case() {
        let repo = fixture_repo();
        assert_eq!(repo.get_by_customer("coastal").unwrap().len(), 2);
        assert_eq!(repo.get_by_customer("ROADWORKS").unwrap().len(), 1);
        assert!(repo.get_by_customer("quarry").unwrap().is_empty());
    }

    #[test]
    fn test_status_filter() {
        let repo = fixture_repo();
        assert_eq!(repo.get_by_status(InvoiceStatus::Pending).unwrap().len(), 2);
        assert_eq!(repo.get_by_status(InvoiceStatus::Paid).unwrap().len(), 1);
    }

    #[test]
    fn test_paid_invoice_is_closed() {
        let repo = fixture_repo();
        let paid = repo.get_by_status(InvoiceStatus::Paid).unwrap()[0].id;

        let err = repo.update_status(paid, InvoiceStatus::Pending).unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));

        let pending = repo.get_by_status(InvoiceStatus::Pending).unwrap()[0].id;
        assert_eq!(
            repo.update_status(pending, InvoiceStatus::Paid).unwrap().status,
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_mark_overdue_only_past_due_pending() {
        let repo = fixture_repo();
        let flagged = repo.mark_overdue(at(2, 5)).unwrap();

        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].invoice_number, "INV-2024-002");
        // already flagged: nothing more to do
        assert!(repo.mark_overdue(at(2, 5) + Duration::hours(1)).unwrap().is_empty());
    }

    #[test]
    fn test_report_after_due_date() {
        let report = InvoiceService::new(fixture_repo()).report(at(2, 5)).unwrap();

        assert_eq!(report.summary.count, 4);
        assert_eq!(report.summary.total_amount, dec("13800"));
        assert_eq!(report.summary.paid_amount, dec("4800"));
        assert_eq!(report.summary.outstanding_amount, dec("9000"));
        assert_eq!(report.summary.overdue_count, 1);
        assert_eq!(report.overdue.len(), 1);
        assert_eq!(report.pending.len(), 1);
    }

    #[test]
    fn test_delete_unknown_invoice() {
        let repo = fixture_repo();
        assert!(matches!(repo.delete(Uuid::new_v4()), Err(AppError::NotFound(_))));
        let id = repo.get_all().unwrap()[0].id;
        repo.delete(id).unwrap();
        assert!(matches!(repo.get_by_id(id), Err(AppError::NotFound(_))));
    }
}
