//! Narrow API seams for the controllers.
//!
//! Each controller depends on the smallest slice of the backend it needs,
//! so tests can substitute in-memory fakes. `ApiClient` implements all of
//! them.

use kerala_catalog::{Product, StockUpdateRequest};
use kerala_client::{ApiClient, ApiError, DashboardSummary, StoreProfile, SubscriptionStatus};

/// Product list and stock mutation, as used by the stock screen.
#[allow(async_fn_in_trait)]
pub trait StockApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn update_stock(&self, req: &StockUpdateRequest) -> Result<(), ApiError>;
}

/// The three independent dashboard reads.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    async fn dashboard(&self) -> Result<DashboardSummary, ApiError>;
    async fn store_profile(&self) -> Result<StoreProfile, ApiError>;
    async fn subscription(&self) -> Result<SubscriptionStatus, ApiError>;
}

/// Unread-count feed for the shell badge.
#[allow(async_fn_in_trait)]
pub trait NotificationApi {
    async fn unread_count(&self) -> Result<u32, ApiError>;
    async fn mark_all_read(&self) -> Result<(), ApiError>;
}

impl StockApi for ApiClient {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.products().await
    }

    async fn update_stock(&self, req: &StockUpdateRequest) -> Result<(), ApiError> {
        ApiClient::update_stock(self, req).await
    }
}

impl DashboardApi for ApiClient {
    async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        ApiClient::dashboard(self).await
    }

    async fn store_profile(&self) -> Result<StoreProfile, ApiError> {
        ApiClient::store_profile(self).await
    }

    async fn subscription(&self) -> Result<SubscriptionStatus, ApiError> {
        ApiClient::subscription(self).await
    }
}

impl NotificationApi for ApiClient {
    async fn unread_count(&self) -> Result<u32, ApiError> {
        Ok(self.notifications().await?.unread_count)
    }

    async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.clear_all_notifications().await
    }
}
