//! `kerala-core` — foundation building blocks for the seller client.
//!
//! This crate contains **pure domain** primitives (no network or storage
//! concerns): typed identifiers, the error model, and the stock quantity
//! value type.

pub mod error;
pub mod id;
pub mod quantity;

pub use error::{DomainError, DomainResult};
pub use id::{NotificationId, ProductId, SellerId};
pub use quantity::StockQuantity;
