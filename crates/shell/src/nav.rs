//! Navigation stack.
//!
//! The one hard requirement: after logout the reset must discard all
//! history, so no back action can land on an authenticated screen.

use crate::route::{AuthRoute, Route};

/// Back-stack of routes. The top of the stack is the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavStack {
    stack: Vec<Route>,
}

impl NavStack {
    /// Start at the given entry screen.
    pub fn new(entry: Route) -> Self {
        Self { stack: vec![entry] }
    }

    pub fn current(&self) -> Route {
        // The stack is never empty: pop refuses to remove the last entry
        // and every reset seeds one route.
        *self.stack.last().unwrap_or(&Route::Auth(AuthRoute::Login))
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Navigate forward. Re-pushing the active route is a no-op.
    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            self.stack.push(route);
        }
    }

    /// Back action. Returns the newly active route, or `None` when already
    /// at the stack root (the embedder then backgrounds the app).
    pub fn pop(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        Some(self.current())
    }

    /// Logout reset: replace the whole stack with the auth entry screen.
    /// All history is discarded.
    pub fn reset_to_auth(&mut self) {
        tracing::info!("navigation reset to auth stack");
        self.stack.clear();
        self.stack.push(Route::Auth(AuthRoute::Login));
    }

    /// Login reset: replace the whole stack with the main entry screen.
    pub fn reset_to_main(&mut self, entry: Route) {
        self.stack.clear();
        self.stack.push(entry);
    }
}
