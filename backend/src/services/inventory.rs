//! Inventory reporting over the bin yard

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{summarize_inventory, InventoryBin, InventorySummary};

use crate::error::AppResult;
use crate::repositories::InventoryRepository;

/// Inventory service for stock level alerts
pub struct InventoryService {
    bins: Arc<InventoryRepository>,
    low_stock_threshold: Decimal,
}

/// Summary plus the bins needing attention
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub summary: InventorySummary,
    pub low_stock: Vec<InventoryBin>,
    pub near_capacity: Vec<InventoryBin>,
}

impl InventoryService {
    pub fn new(bins: Arc<InventoryRepository>, low_stock_threshold: Decimal) -> Self {
        Self {
            bins,
            low_stock_threshold,
        }
    }

    /// Bins filled below `threshold`, or the configured threshold
    pub fn low_stock(&self, threshold: Option<Decimal>) -> AppResult<Vec<InventoryBin>> {
        let threshold = threshold.unwrap_or(self.low_stock_threshold);
        Ok(self
            .bins
            .get_all()?
            .into_iter()
            .filter(|bin| bin.is_low_stock(threshold))
            .collect())
    }

    pub fn near_capacity(&self) -> AppResult<Vec<InventoryBin>> {
        Ok(self
            .bins
            .get_all()?
            .into_iter()
            .filter(InventoryBin::is_near_capacity)
            .collect())
    }

    pub fn total_value(&self) -> AppResult<Decimal> {
        Ok(self.bins.get_all()?.iter().map(InventoryBin::value).sum())
    }

    pub fn report(&self, threshold: Option<Decimal>) -> AppResult<InventoryReport> {
        let threshold = threshold.unwrap_or(self.low_stock_threshold);
        let bins = self.bins.get_all()?;
        let summary = summarize_inventory(&bins, threshold);

        if summary.low_stock_count > 0 {
            tracing::warn!("{} bins below {} of capacity", summary.low_stock_count, threshold);
        }

        Ok(InventoryReport {
            summary,
            low_stock: bins
                .iter()
                .filter(|bin| bin.is_low_stock(threshold))
                .cloned()
                .collect(),
            near_capacity: bins
                .iter()
                .filter(|bin| bin.is_near_capacity())
                .cloned()
                .collect(),
        })
    }
}
