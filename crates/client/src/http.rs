//! The HTTP client for the seller backend.
//!
//! One `reqwest::Client` with a single fixed timeout; every authenticated
//! request gets the bearer token injected here, and any 401 fires the
//! unauthorized hook (session teardown) before the error is returned, no
//! matter which endpoint produced it. Dropping a returned future aborts
//! the underlying request, so cancel-on-unmount is the caller dropping the
//! future.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use kerala_catalog::{Product, StockUpdateRequest};
use kerala_core::ProductId;

use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, SendOtpRequest};
use crate::error::{ApiError, classify_response};
use crate::notifications::NotificationPage;
use crate::store_api::{
    DashboardSummary, OrderSummary, StockUpdateBody, StoreProfile, SubscriptionStatus,
};

/// Unified fixed request timeout. The source app carried both 15 s and
/// 20 s; one value, one place.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Typed client for the seller backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
    on_unauthorized: Arc<RwLock<Option<UnauthorizedHook>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: Arc::new(RwLock::new(None)),
            on_unauthorized: Arc::new(RwLock::new(None)),
        })
    }

    /// Install or replace the bearer token used for authenticated calls.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Install the global 401 hook (session teardown). Called at most once
    /// per failing request, before the error is returned to the caller.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut guard) = self.on_unauthorized.write() {
            *guard = Some(Arc::new(hook));
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request with the bearer token attached (if any).
    pub(crate) fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        let token = self.token.read().ok().and_then(|g| g.clone());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            let hook = self.on_unauthorized.read().ok().and_then(|g| g.clone());
            if let Some(hook) = hook {
                hook();
            }
        }
        let err = classify_response(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.authed(Method::GET, path)).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.authed(method, path).json(body)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        req.validate()?;
        let resp: LoginResponse = self
            .send_json(Method::POST, "/user/login/", req)
            .await?;
        self.set_token(resp.access_token.clone());
        Ok(resp)
    }

    pub async fn send_otp(&self, req: &SendOtpRequest) -> Result<(), ApiError> {
        crate::auth::validate_phone(&req.phone)?;
        let _: serde_json::Value = self.send_json(Method::POST, "/user/send-otp/", req).await?;
        Ok(())
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        req.validate()?;
        let resp: LoginResponse = self
            .send_json(Method::POST, "/user/register/", req)
            .await?;
        self.set_token(resp.access_token.clone());
        Ok(resp)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard, profile, subscription
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.get_json("/user/dashboard/").await
    }

    pub async fn store_profile(&self) -> Result<StoreProfile, ApiError> {
        self.get_json("/user/store/profile/").await
    }

    pub async fn update_store_profile(&self, profile: &StoreProfile) -> Result<StoreProfile, ApiError> {
        self.send_json(Method::PATCH, "/user/store/profile/", profile)
            .await
    }

    pub async fn subscription(&self) -> Result<SubscriptionStatus, ApiError> {
        self.get_json("/user/subscription/").await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Products and stock
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/user/store/products/").await
    }

    /// Partial update of exactly one stock field.
    pub async fn update_stock(&self, req: &StockUpdateRequest) -> Result<(), ApiError> {
        let path = stock_update_path(req.product_id);
        let body = StockUpdateBody::from(req);
        let _: serde_json::Value = self.send_json(Method::PATCH, &path, &body).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        self.get_json("/user/store/orders/").await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn notifications(&self) -> Result<NotificationPage, ApiError> {
        self.get_json("/api/notifications/").await
    }

    pub async fn mark_notification_read(
        &self,
        id: kerala_core::NotificationId,
    ) -> Result<(), ApiError> {
        let path = format!("/api/notifications/{id}/mark-read/");
        let _: serde_json::Value = self
            .send_json(Method::POST, &path, &serde_json::json!({}))
            .await?;
        Ok(())
    }

    pub async fn clear_all_notifications(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .send_json(Method::POST, "/api/notifications/clear-all/", &serde_json::json!({}))
            .await?;
        Ok(())
    }
}

fn stock_update_path(product_id: ProductId) -> String {
    format!("/user/store/products/{product_id}/update-stock/")
}
