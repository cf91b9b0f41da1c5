//! Shared types, models and analytics for the Slag Plant Operations Platform
//!
//! This crate contains the pure calculation core shared between the backend
//! report tooling, the browser dashboard (via WASM), and other components.
//! Nothing in here performs I/O; every function is deterministic.

pub mod analytics;
pub mod error;
pub mod models;
pub mod parameters;
pub mod types;
pub mod validation;

pub use analytics::*;
pub use error::*;
pub use models::*;
pub use parameters::*;
pub use types::*;
pub use validation::*;
