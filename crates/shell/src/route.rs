//! Route model with derived titles.
//!
//! Every route carries its own default title/subtitle, so a screen that
//! sets nothing still gets a correct top bar (the source app let the
//! previous screen's title stick; deriving from the route avoids that).

use serde::{Deserialize, Serialize};

/// Screens reachable before authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRoute {
    Login,
    Otp,
    Register,
    CreateShop,
}

/// Primary screens on the bottom tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabRoute {
    Home,
    Orders,
    Stock,
    Billing,
    Profile,
}

/// Secondary business-tool screens on the side drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerRoute {
    Notifications,
    StoreProfile,
    Subscription,
    Support,
}

/// Any screen the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "screen")]
pub enum Route {
    Auth(AuthRoute),
    Tab(TabRoute),
    Drawer(DrawerRoute),
}

impl Route {
    /// Whether this route requires an authenticated session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Auth(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Auth(AuthRoute::Login) => "Sign In",
            Route::Auth(AuthRoute::Otp) => "Verify OTP",
            Route::Auth(AuthRoute::Register) => "Create Account",
            Route::Auth(AuthRoute::CreateShop) => "Set Up Your Store",
            Route::Tab(TabRoute::Home) => "Dashboard",
            Route::Tab(TabRoute::Orders) => "Orders",
            Route::Tab(TabRoute::Stock) => "Stock Management",
            Route::Tab(TabRoute::Billing) => "Billing",
            Route::Tab(TabRoute::Profile) => "My Profile",
            Route::Drawer(DrawerRoute::Notifications) => "Notifications",
            Route::Drawer(DrawerRoute::StoreProfile) => "Store Profile",
            Route::Drawer(DrawerRoute::Subscription) => "Subscription",
            Route::Drawer(DrawerRoute::Support) => "Support",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Route::Tab(TabRoute::Home) => "Today at a glance",
            Route::Tab(TabRoute::Orders) => "Track and fulfil orders",
            Route::Tab(TabRoute::Stock) => "Adjust inventory counts",
            Route::Tab(TabRoute::Billing) => "Local billing",
            _ => "",
        }
    }
}
