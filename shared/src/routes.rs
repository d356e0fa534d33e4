use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Every view the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum Route {
    #[strum(serialize = "/")]
    Root,
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/signup")]
    Signup,
    #[strum(serialize = "/dashboard")]
    Dashboard,
    #[strum(serialize = "/disease")]
    Disease,
    #[strum(serialize = "/yield")]
    Yield,
    #[strum(serialize = "/404")]
    NotFound,
}

impl Route {
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Maps a location pathname onto a route. A trailing slash is ignored;
    /// unknown paths become [`Route::NotFound`].
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        normalized.parse().unwrap_or(Route::NotFound)
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Dashboard | Route::Disease | Route::Yield)
    }

    pub fn is_auth_page(self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }
}

/// Outcome of the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render(Route),
    Redirect(Route),
}

/// Decides what to show for `route` given whether a session exists.
pub fn authorize(route: Route, has_session: bool) -> Access {
    match (route, has_session) {
        (Route::Root, true) => Access::Redirect(Route::Dashboard),
        (Route::Root, false) => Access::Redirect(Route::Login),
        (r, true) if r.is_auth_page() => Access::Redirect(Route::Dashboard),
        (r, false) if r.requires_session() => Access::Redirect(Route::Login),
        (r, _) => Access::Render(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_guard_table() {
        let cases = [
            (Route::Login, true, Access::Redirect(Route::Dashboard)),
            (Route::Login, false, Access::Render(Route::Login)),
            (Route::Signup, true, Access::Redirect(Route::Dashboard)),
            (Route::Signup, false, Access::Render(Route::Signup)),
            (Route::Dashboard, true, Access::Render(Route::Dashboard)),
            (Route::Dashboard, false, Access::Redirect(Route::Login)),
            (Route::Disease, true, Access::Render(Route::Disease)),
            (Route::Disease, false, Access::Redirect(Route::Login)),
            (Route::Yield, true, Access::Render(Route::Yield)),
            (Route::Yield, false, Access::Redirect(Route::Login)),
            (Route::Root, true, Access::Redirect(Route::Dashboard)),
            (Route::Root, false, Access::Redirect(Route::Login)),
            (Route::NotFound, true, Access::Render(Route::NotFound)),
            (Route::NotFound, false, Access::Render(Route::NotFound)),
        ];

        for (route, has_session, expected) in cases {
            assert_eq!(authorize(route, has_session), expected, "{:?}/{}", route, has_session);
            // deterministic
            assert_eq!(authorize(route, has_session), authorize(route, has_session));
        }
    }

    #[test]
    fn test_redirects_never_chain() {
        for route in Route::iter() {
            for has_session in [true, false] {
                if let Access::Redirect(target) = authorize(route, has_session) {
                    assert_eq!(authorize(target, has_session), Access::Render(target));
                }
            }
        }
    }

    #[test]
    fn test_path_round_trip() {
        for route in Route::iter().filter(|r| *r != Route::NotFound) {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_from_path_normalization() {
        assert_eq!(Route::from_path(""), Route::Root);
        assert_eq!(Route::from_path("/yield/"), Route::Yield);
        assert_eq!(Route::from_path("/disease//"), Route::Disease);
        assert_eq!(Route::from_path("/settings"), Route::NotFound);
        assert_eq!(Route::from_path("/Login"), Route::NotFound);
    }
}
