//! Top navigation bar state.

use crate::router::Route;

/// One entry of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Home",
        route: Route::Home,
    },
    NavLink {
        label: "Calculator",
        route: Route::Calculator,
    },
    NavLink {
        label: "Weather",
        route: Route::Weather,
    },
];

#[derive(Debug, Clone)]
pub struct Navigation {
    title: String,
    mobile_menu_open: bool,
}

impl Navigation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mobile_menu_open: false,
        }
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
        tracing::debug!("Mobile menu open: {}", self.mobile_menu_open);
    }

    /// Called when a link is selected.
    pub fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn links(&self) -> &'static [NavLink] {
        &NAV_LINKS
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new("Jaka App")
    }
}
