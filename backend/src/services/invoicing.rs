//! Invoice reporting

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{summarize_invoices, Invoice, InvoiceStatus, InvoiceSummary};

use crate::error::AppResult;
use crate::repositories::InvoiceRepository;

/// Summary plus the invoices still awaiting payment
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceReport {
    pub summary: InvoiceSummary,
    pub overdue: Vec<Invoice>,
    pub pending: Vec<Invoice>,
}

pub struct InvoiceService {
    invoices: Arc<InvoiceRepository>,
}

impl InvoiceService {
    pub fn new(invoices: Arc<InvoiceRepository>) -> Self {
        Self { invoices }
    }

    /// Flag invoices past due at `now`, then summarize the ledger
    pub fn report(&self, now: DateTime<Utc>) -> AppResult<InvoiceReport> {
        self.invoices.mark_overdue(now)?;
        let invoices = self.invoices.get_all()?;

        let by_status = |status: InvoiceStatus| -> Vec<Invoice> {
            invoices
                .iter()
                .filter(|invoice| invoice.status == status)
                .cloned()
                .collect()
        };

        Ok(InvoiceReport {
            summary: summarize_invoices(&invoices),
            overdue: by_status(InvoiceStatus::Overdue),
            pending: by_status(InvoiceStatus::Pending),
        })
    }
}
