//! `kerala-shell`
//!
//! **Responsibility:** the navigation shell around authenticated screens.
//!
//! This crate provides:
//! - The route model (tabs, drawer screens, auth flow) with derived titles
//! - `NavStack` with a history-clearing reset on logout
//! - The drawer state machine with the drag/flick gesture protocol
//! - The unread-notification badge
//! - The top bar (title/subtitle, single writer: the active screen)
//! - `Resource<T>`, the per-screen load/refresh state every list screen uses
//!
//! Everything here is headless; rendering and gesture capture live in the
//! embedding UI.

pub mod badge;
pub mod drawer;
pub mod nav;
pub mod resource;
pub mod route;
pub mod topbar;

pub use badge::Badge;
pub use drawer::{Drawer, DrawerState};
pub use nav::NavStack;
pub use resource::Resource;
pub use route::{AuthRoute, DrawerRoute, Route, TabRoute};
pub use topbar::TopBar;
