//! `kerala-app`
//!
//! **Responsibility:** composition of the seller client.
//!
//! This crate wires the pieces together the way the running app does:
//! - `SessionFlow`: login/register → gate flip, plus the 401 hook
//! - `DashboardLoader`: three independent concurrent reads
//! - `StockController`: the stock workflow driven against the API
//! - `NotificationPoller`: the 30-second badge poll
//!
//! API access goes through narrow traits so the controllers are testable
//! against in-memory fakes; `kerala-client::ApiClient` implements them all.

pub mod api;
pub mod dashboard;
pub mod notifications;
pub mod session_flow;
pub mod stock;

pub use api::{DashboardApi, NotificationApi, StockApi};
pub use dashboard::{DashboardLoader, DashboardView};
pub use notifications::{NOTIFICATION_POLL_INTERVAL, NotificationPoller};
pub use session_flow::{FlowError, SessionFlow};
pub use stock::{RowOutcome, StockController};
