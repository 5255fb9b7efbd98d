//! Product read model and stock-status derivation.

use serde::{Deserialize, Serialize};

use kerala_core::ProductId;

/// Online stock at or below this count is flagged as low.
pub const LOW_STOCK_MAX: u32 = 5;

/// Product read model (matches the backend product list response).
///
/// `online_stock` is the slice of `total_stock` exposed for online purchase.
/// The relation `online_stock <= total_stock` is advisory: the client flags
/// a violation as [`StockStatus::Overstocked`] but does not block it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub model_name: Option<String>,
    pub sku: Option<String>,
    pub total_stock: u32,
    pub online_stock: u32,
}

impl Product {
    /// Derive the current stock status. Pure; recomputed on every call.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::derive(self.online_stock, self.total_stock)
    }
}

/// Stock status, a pure function of `(online_stock, total_stock)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    Overstocked,
    InStock,
}

impl StockStatus {
    pub fn derive(online: u32, total: u32) -> Self {
        if online == 0 {
            StockStatus::OutOfStock
        } else if online <= LOW_STOCK_MAX {
            StockStatus::LowStock
        } else if online > total {
            StockStatus::Overstocked
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::Overstocked => "Overstocked",
            StockStatus::InStock => "In Stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
