//! `kerala-catalog`
//!
//! **Responsibility:** the store's product model as seen by the client.
//!
//! This crate provides:
//! - The `Product` read model mirrored from the backend product list
//! - Pure stock-status derivation (never stored, recomputed on demand)
//! - Search and status-filter composition over the product list
//! - The stock adjustment confirm-before-commit workflow with per-row locking
//!
//! The backend remains the authority for every value here; nothing in this
//! crate survives a refetch.

pub mod filter;
pub mod product;
pub mod workflow;

pub use filter::{FilterCounts, StockFilter, apply, counts, matches_search};
pub use product::{Product, StockStatus};
pub use workflow::{Outcome, PendingEdit, StockField, StockUpdateRequest, StockWorkflow};
