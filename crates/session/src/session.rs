//! Session DTOs and the canonical storage key set.

use serde::{Deserialize, Serialize};

use kerala_core::SellerId;

/// Canonical storage keys.
///
/// One key set only; the legacy camelCase variants that accumulated in
/// earlier iterations are neither read nor written.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const API_TOKEN: &str = "api_token";
    pub const USER_TYPE: &str = "user_type";
    pub const SELLER_PROFILE: &str = "seller_profile";

    /// Every key the session owns; logout removes all of them.
    pub const ALL: [&str; 5] = [
        ACCESS_TOKEN,
        REFRESH_TOKEN,
        API_TOKEN,
        USER_TYPE,
        SELLER_PROFILE,
    ];
}

/// Tenant role marker persisted alongside the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Seller,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Seller => "seller",
        }
    }
}

/// Seller profile as returned by the login/registration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerProfile {
    pub id: SellerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub shop_name: Option<String>,
}

/// A live session: tokens plus the profile they were issued for.
///
/// Created on successful login/registration, persisted in full, destroyed
/// on logout or on any 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub api_token: String,
    pub user_type: UserType,
    pub profile: SellerProfile,
}
