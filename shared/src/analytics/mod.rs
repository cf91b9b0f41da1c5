//! Calculation core: chemistry, pricing, yields, costs, profit, queue
//! ordering and maintenance scheduling
//!
//! All functions are pure. Each model has a method on its parameter table
//! and a free function that runs it with the default table.

mod aggregate;
mod costs;
mod maintenance;
mod pricing;
mod processing;
mod profit;
mod quality;
mod tolerance;
mod yields;

pub use aggregate::*;
pub use costs::*;
pub use maintenance::*;
pub use pricing::*;
pub use processing::*;
pub use profit::*;
pub use quality::*;
pub use tolerance::*;
pub use yields::*;
