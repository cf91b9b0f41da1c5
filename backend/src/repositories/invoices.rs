//! Customer invoice store

use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use shared::{next_invoice_number, validate_new_invoice, Invoice, InvoiceStatus, NewInvoice};
use uuid::Uuid;

use super::{read_json_array, read_lock, write_lock};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct InvoiceRepository {
    invoices: RwLock<Vec<Invoice>>,
}

impl InvoiceRepository {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices: RwLock::new(invoices),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let invoices: Vec<Invoice> = read_json_array(path)?;
        tracing::info!("Loaded {} invoices", invoices.len());
        Ok(Self::new(invoices))
    }

    pub fn get_all(&self) -> AppResult<Vec<Invoice>> {
        Ok(read_lock(&self.invoices)?.clone())
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<Invoice> {
        read_lock(&self.invoices)?
            .iter()
            .find(|invoice| invoice.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Invoice {}", id)))
    }

    pub fn get_by_status(&self, status: InvoiceStatus) -> AppResult<Vec<Invoice>> {
        Ok(read_lock(&self.invoices)?
            .iter()
            .filter(|invoice| invoice.status == status)
            .cloned()
            .collect())
    }

    /// Invoices whose customer name contains `query`, ignoring case
    pub fn get_by_customer(&self, query: &str) -> AppResult<Vec<Invoice>> {
        let query = query.to_lowercase();
        Ok(read_lock(&self.invoices)?
            .iter()
            .filter(|invoice| invoice.customer.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    /// Raise a pending invoice numbered next in the `INV-<year>-NNN` series
    pub fn create(&self, input: NewInvoice, now: DateTime<Utc>) -> AppResult<Invoice> {
        if let Err(e) = validate_new_invoice(&input) {
            tracing::warn!(customer = %input.customer, "Rejected invoice: {}", e);
            return Err(e.into());
        }

        let mut invoices = write_lock(&self.invoices)?;
        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number: next_invoice_number(&invoices, now),
            amount: input.quantity * input.price_per_tonne,
            customer: input.customer,
            material: input.material,
            quantity: input.quantity,
            price_per_tonne: input.price_per_tonne,
            date: now,
            due_date: input.due_date,
            status: InvoiceStatus::Pending,
            load_ids: input.load_ids,
        };
        invoices.push(invoice.clone());

        tracing::info!(
            invoice_number = %invoice.invoice_number,
            customer = %invoice.customer,
            amount = %invoice.amount,
            "Raised invoice"
        );
        Ok(invoice)
    }

    /// Move an open invoice to overdue, paid or cancelled
    pub fn update_status(&self, id: Uuid, next: InvoiceStatus) -> AppResult<Invoice> {
        let mut invoices = write_lock(&self.invoices)?;
        let invoice = invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Invoice {}", id)))?;

        invoice.status = invoice.status.advance_to(next).map_err(|e| {
            tracing::warn!(%id, "Rejected invoice status change: {}", e);
            AppError::InvalidStateTransition(e.to_string())
        })?;

        tracing::info!(%id, status = %invoice.status, "Invoice status updated");
        Ok(invoice.clone())
    }

    /// Flag open invoices past their due date as overdue
    pub fn mark_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Invoice>> {
        let mut invoices = write_lock(&self.invoices)?;
        let flagged: Vec<Invoice> = invoices
            .iter_mut()
            .filter(|invoice| {
                invoice.status == InvoiceStatus::Pending
                    && invoice.due_date.is_some_and(|due| due < now)
            })
            .map(|invoice| {
                invoice.status = InvoiceStatus::Overdue;
                invoice.clone()
            })
            .collect();

        if !flagged.is_empty() {
            tracing::info!("Marked {} invoices overdue", flagged.len());
        }
        Ok(flagged)
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut invoices = write_lock(&self.invoices)?;
        let index = invoices
            .iter()
            .position(|invoice| invoice.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Invoice {}", id)))?;
        invoices.remove(index);
        tracing::info!(%id, "Deleted invoice");
        Ok(())
    }
}
