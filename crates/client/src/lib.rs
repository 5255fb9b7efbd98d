//! `kerala-client`
//!
//! **Responsibility:** typed HTTP access to the seller backend.
//!
//! This crate provides:
//! - `ApiClient` with one fixed timeout and bearer injection
//! - The global 401 hook (session teardown happens once, here, not per
//!   screen)
//! - Wire DTOs for auth, dashboard, store profile, products, stock
//!   updates, orders, subscription, and notifications
//! - Client-side validation that runs before any network call
//!
//! The backend owns all business rules; this crate only shapes requests
//! and classifies failures.

pub mod auth;
pub mod error;
pub mod http;
pub mod notifications;
pub mod store_api;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, SendOtpRequest, validate_phone};
pub use error::{ApiError, classify_response};
pub use http::{ApiClient, REQUEST_TIMEOUT};
pub use notifications::{NotificationItem, NotificationPage};
pub use store_api::{
    DashboardSummary, OrderSummary, StockUpdateBody, StoreProfile, SubscriptionStatus,
};
