//! Report export

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::ProfitRecord;

use crate::error::{AppError, AppResult};

/// One row of the profit CSV export
#[derive(Debug, Clone, Serialize)]
pub struct ProfitCsvRow {
    pub load_number: String,
    pub date: NaiveDate,
    pub source: String,
    pub weight: Decimal,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub profit_per_tonne: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
}

impl From<&ProfitRecord> for ProfitCsvRow {
    fn from(record: &ProfitRecord) -> Self {
        Self {
            load_number: record.load_number.clone(),
            date: record.date.date_naive(),
            source: record.source.clone(),
            weight: record.weight,
            revenue: record.total_revenue.round_dp(2),
            cost: record.total_cost.round_dp(2),
            profit: record.profit.round_dp(2),
            profit_per_tonne: record.profit_per_tonne.map(|value| value.round_dp(2)),
            profit_margin: record.profit_margin.map(|value| value.round_dp(2)),
        }
    }
}

pub struct ReportingService;

impl ReportingService {
    /// Profit records as CSV, one row per load.
    ///
    /// Margins and per-tonne figures are blank for zero-weight loads.
    pub fn export_profit_csv(records: &[ProfitRecord]) -> AppResult<String> {
        let rows: Vec<ProfitCsvRow> = records.iter().map(ProfitCsvRow::from).collect();
        tracing::info!("Exporting {} profit rows", rows.len());
        Self::export_to_csv(&rows)
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
