//! Reporting services for the slag processing plant

pub mod inventory;
pub mod invoicing;
pub mod maintenance;
pub mod personnel;
pub mod processing;
pub mod profit_analytics;
pub mod profit_cache;
pub mod quality;
pub mod reporting;

pub use inventory::{InventoryReport, InventoryService};
pub use invoicing::{InvoiceReport, InvoiceService};
pub use maintenance::MaintenanceService;
pub use personnel::PersonnelService;
pub use processing::ProcessingService;
pub use profit_analytics::ProfitAnalyticsService;
pub use profit_cache::{CacheStats, ProfitCache};
pub use quality::QualityService;
pub use reporting::{ProfitCsvRow, ReportingService};
