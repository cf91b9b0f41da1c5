//! Error types for the calculation core

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Element, InvoiceStatus, LoadStatus};

/// Rejected input at the ingestion boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{element} percentage {value} is outside 0-100")]
    PercentageOutOfRange { element: Element, value: Decimal },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("Unknown {kind}: {value}")]
    Unknown { kind: &'static str, value: String },

    #[error("Load cannot move from {from} to {to}")]
    InvalidTransition { from: LoadStatus, to: LoadStatus },

    #[error("Invoice cannot move from {from} to {to}")]
    InvalidInvoiceTransition { from: InvoiceStatus, to: InvoiceStatus },

    #[error("{name} is at maximum task capacity")]
    AtCapacity { name: String },

    #[error("{name} has no tasks to unassign")]
    NoAssignedTasks { name: String },
}

/// Failure inside a model computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}
