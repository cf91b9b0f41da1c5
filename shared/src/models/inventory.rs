//! Inventory bin models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fill ratio at or above which a bin is reported as nearly full
pub const NEAR_CAPACITY_RATIO: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Default fill ratio below which a bin is reported as low stock
pub const LOW_STOCK_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// A storage bin holding one finished material
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryBin {
    pub id: Uuid,
    pub material: String,
    /// Stored tonnes
    pub quantity: Decimal,
    /// Bin capacity in tonnes
    pub capacity: Decimal,
    pub price_per_tonne: Decimal,
    #[serde(default)]
    pub location: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl InventoryBin {
    /// Fraction of capacity in use, `None` for a zero-capacity bin
    pub fn fill_ratio(&self) -> Option<Decimal> {
        self.quantity.checked_div(self.capacity)
    }

    pub fn is_low_stock(&self, threshold: Decimal) -> bool {
        self.fill_ratio().is_some_and(|ratio| ratio < threshold)
    }

    pub fn is_near_capacity(&self) -> bool {
        self.fill_ratio()
            .is_some_and(|ratio| ratio >= NEAR_CAPACITY_RATIO)
    }

    pub fn value(&self) -> Decimal {
        self.quantity * self.price_per_tonne
    }
}

/// Totals over the bin yard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventorySummary {
    pub bin_count: usize,
    pub total_quantity: Decimal,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub near_capacity_count: usize,
}

/// Summarize bins, flagging low stock below `low_stock_threshold`
pub fn summarize_inventory(bins: &[InventoryBin], low_stock_threshold: Decimal) -> InventorySummary {
    InventorySummary {
        bin_count: bins.len(),
        total_quantity: bins.iter().map(|b| b.quantity).sum(),
        total_value: bins.iter().map(InventoryBin::value).sum(),
        low_stock_count: bins
            .iter()
            .filter(|b| b.is_low_stock(low_stock_threshold))
            .count(),
        near_capacity_count: bins.iter().filter(|b| b.is_near_capacity()).count(),
    }
}
