//! Store-facing read models: dashboard, profile, orders, subscription, and
//! the stock partial-update body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kerala_catalog::{StockField, StockUpdateRequest};

/// Dashboard summary (`GET /user/dashboard/`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSummary {
    pub total_orders: u32,
    pub pending_orders: u32,
    pub total_revenue: f64,
    pub low_stock_count: u32,
}

/// Store profile (`GET|PATCH /user/store/profile/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub shop_name: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
    pub gst_number: Option<String>,
}

/// Subscription status (`GET /user/subscription/`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionStatus {
    pub plan: String,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// One order row (`GET /user/store/orders/`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
    pub order_number: String,
    pub status: String,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Body of `PATCH /user/store/products/{id}/update-stock/`.
///
/// Exactly one stock field is present per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockUpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_stock: Option<u32>,
    pub note: String,
}

impl From<&StockUpdateRequest> for StockUpdateBody {
    fn from(req: &StockUpdateRequest) -> Self {
        let (total_stock, online_stock) = match req.field {
            StockField::TotalStock => (Some(req.new_value), None),
            StockField::OnlineStock => (None, Some(req.new_value)),
        };
        Self {
            total_stock,
            online_stock,
            note: req.note.clone(),
        }
    }
}
