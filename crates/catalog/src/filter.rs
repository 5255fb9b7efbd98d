//! Search and stock-status filtering over the product list.
//!
//! Search is a case-insensitive substring match against name, model name,
//! and SKU, applied before the status filter. Both operations are set
//! intersections, so their order does not matter.

use serde::{Deserialize, Serialize};

use crate::product::{Product, StockStatus};

/// Filter tabs shown on the stock screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockFilter {
    All,
    LowStock,
    OutOfStock,
    Overstocked,
}

impl StockFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::LowStock => product.stock_status() == StockStatus::LowStock,
            StockFilter::OutOfStock => product.stock_status() == StockStatus::OutOfStock,
            StockFilter::Overstocked => product.stock_status() == StockStatus::Overstocked,
        }
    }
}

/// Per-tab counts for the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCounts {
    pub all: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub overstocked: usize,
}

/// Case-insensitive substring match on name, model name, and SKU.
///
/// An empty term matches everything.
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let hit = |field: &str| field.to_lowercase().contains(&term);
    hit(&product.name)
        || product.model_name.as_deref().is_some_and(hit)
        || product.sku.as_deref().is_some_and(hit)
}

/// Apply search then status filter, returning references in list order.
pub fn apply<'a>(products: &'a [Product], term: &str, filter: StockFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches_search(p, term))
        .filter(|p| filter.matches(p))
        .collect()
}

/// Count products per filter tab (search is applied first, as in the UI).
pub fn counts(products: &[Product], term: &str) -> FilterCounts {
    let mut out = FilterCounts::default();
    for product in products.iter().filter(|p| matches_search(p, term)) {
        out.all += 1;
        match product.stock_status() {
            StockStatus::LowStock => out.low_stock += 1,
            StockStatus::OutOfStock => out.out_of_stock += 1,
            StockStatus::Overstocked => out.overstocked += 1,
            StockStatus::InStock => {}
        }
    }
    out
}
