use crate::routes::Route;

/// Viewports narrower than this get the overlay drawer.
pub const MOBILE_BREAKPOINT_PX: f64 = 600.0;
pub const DRAWER_WIDTH_PX: u32 = 240;

pub struct MenuItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

pub const MENU_ITEMS: [MenuItem; 3] = [
    MenuItem {
        label: "Dashboard",
        icon: "fa-solid fa-gauge",
        route: Route::Dashboard,
    },
    MenuItem {
        label: "Disease Detection",
        icon: "fa-solid fa-bug",
        route: Route::Disease,
    },
    MenuItem {
        label: "Yield Prediction",
        icon: "fa-solid fa-tractor",
        route: Route::Yield,
    },
];

/// Responsive state of the side panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavState {
    viewport_width: f64,
    drawer_open: bool,
}

impl NavState {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            drawer_open: false,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width < MOBILE_BREAKPOINT_PX
    }

    /// Whether the panel is on screen: always on desktop, only when opened
    /// on mobile.
    pub fn is_panel_visible(&self) -> bool {
        !self.is_mobile() || self.drawer_open
    }

    pub fn is_drawer_open(&self) -> bool {
        self.is_mobile() && self.drawer_open
    }

    pub fn toggle(self) -> Self {
        Self {
            drawer_open: self.is_mobile() && !self.drawer_open,
            ..self
        }
    }

    pub fn close(self) -> Self {
        Self {
            drawer_open: false,
            ..self
        }
    }

    /// Called after a menu selection or logout.
    pub fn after_action(self) -> Self {
        if self.is_mobile() { self.close() } else { self }
    }

    pub fn resized(self, viewport_width: f64) -> Self {
        let next = Self {
            viewport_width,
            ..self
        };
        // crossing into desktop drops the overlay so it is closed next time
        if next.is_mobile() { next } else { next.close() }
    }
}
