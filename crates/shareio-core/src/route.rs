//! Route guard: two fixed route tables, one per login state.
//!
//! | Table           | Route        | Catch-all                    |
//! |-----------------|--------------|------------------------------|
//! | Authenticated   | `/dashboard` | redirect to `/dashboard`     |
//! | Unauthenticated | `/auth-login`| redirect to `/auth-login`    |

/// Dashboard path (authenticated table).
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Login path (unauthenticated table).
pub const LOGIN_PATH: &str = "/auth-login";

/// Page mounted for a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminRoute {
    Dashboard,
    Login,
}

impl AdminRoute {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => DASHBOARD_PATH,
            Self::Login => LOGIN_PATH,
        }
    }
}

/// Which route table is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTable {
    Authenticated,
    Unauthenticated,
}

impl RouteTable {
    pub fn for_login_state(logged_in: bool) -> Self {
        if logged_in {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }

    /// The table's only page; every other path redirects here.
    pub fn home(&self) -> AdminRoute {
        match self {
            Self::Authenticated => AdminRoute::Dashboard,
            Self::Unauthenticated => AdminRoute::Login,
        }
    }

    /// Match a path against this table.
    pub fn resolve(&self, path: &str) -> Resolution {
        let home = self.home();
        let redirect = (normalize_path(path) != home.path()).then_some(home.path());
        Resolution {
            route: home,
            redirect,
        }
    }
}

/// Outcome of matching a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub route: AdminRoute,
    /// Set when the path has to be replaced.
    pub redirect: Option<&'static str>,
}

/// Resolve a path for the given login state.
pub fn resolve(path: &str, logged_in: bool) -> Resolution {
    RouteTable::for_login_state(logged_in).resolve(path)
}

/// Turn a URL hash or path into `/segment/...` form.
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('#').trim_matches('/');
    format!("/{}", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("#/"), "/");
        assert_eq!(normalize_path("#/dashboard"), "/dashboard");
        assert_eq!(normalize_path("/auth-login/"), "/auth-login");
    }

    #[test]
    fn test_logged_in_routes() {
        let r = resolve("#/dashboard", true);
        assert_eq!(r.route, AdminRoute::Dashboard);
        assert_eq!(r.redirect, None);

        for path in ["", "#/", "#/auth-login", "#/anything/else"] {
            let r = resolve(path, true);
            assert_eq!(r.route, AdminRoute::Dashboard);
            assert_eq!(r.redirect, Some(DASHBOARD_PATH), "path {:?}", path);
        }
    }

    #[test]
    fn test_logged_out_routes() {
        let r = resolve("/auth-login", false);
        assert_eq!(r.route, AdminRoute::Login);
        assert_eq!(r.redirect, None);

        for path in ["", "#/dashboard", "#/x"] {
            let r = resolve(path, false);
            assert_eq!(r.route, AdminRoute::Login);
            assert_eq!(r.redirect, Some(LOGIN_PATH));
        }
    }

    #[test]
    fn test_table_for_state() {
        assert_eq!(RouteTable::for_login_state(true), RouteTable::Authenticated);
        assert_eq!(RouteTable::for_login_state(false).home(), AdminRoute::Login);
    }
}
