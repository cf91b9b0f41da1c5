//! Domain models for the Slag Plant Operations Platform

mod chemistry;
mod equipment;
mod inventory;
mod invoice;
mod load;
mod maintenance;
mod personnel;
mod profit;

pub use chemistry::*;
pub use equipment::*;
pub use inventory::*;
pub use invoice::*;
pub use load::*;
pub use maintenance::*;
pub use personnel::*;
pub use profit::*;
