//! Top bar title state.
//!
//! Title and subtitle derive from the active route; a screen may override
//! them for customization. Single writer: only the active screen calls
//! [`TopBar::override_title`], and every route change clears the previous
//! override, so a screen that sets nothing still shows its own title.

use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBar {
    route: Route,
    override_title: Option<(String, String)>,
}

impl TopBar {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            override_title: None,
        }
    }

    /// A new screen became active; derived title takes over.
    pub fn set_route(&mut self, route: Route) {
        self.route = route;
        self.override_title = None;
    }

    /// Per-screen customization, e.g. the shop name as a subtitle.
    pub fn override_title(&mut self, title: impl Into<String>, subtitle: impl Into<String>) {
        self.override_title = Some((title.into(), subtitle.into()));
    }

    pub fn title(&self) -> &str {
        match &self.override_title {
            Some((title, _)) => title,
            None => self.route.title(),
        }
    }

    pub fn subtitle(&self) -> &str {
        match &self.override_title {
            Some((_, subtitle)) => subtitle,
            None => self.route.subtitle(),
        }
    }
}
