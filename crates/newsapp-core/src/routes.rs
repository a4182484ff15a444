//! Route table, route guard and navbar action.

use std::fmt;

use crate::session::SessionContext;

/// Pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// `/`
    #[default]
    Login,
    /// `/signup`
    Signup,
    /// `/dashboard` (requires a session)
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Parses one of the known paths. A trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "/" | "" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Resolves the page that is actually shown for this route.
    ///
    /// Protected routes redirect to the root route without a session; every
    /// other combination renders the requested page unchanged.
    pub fn guard(self, session: &SessionContext) -> Route {
        if self.is_protected() && !session.is_authenticated() {
            tracing::debug!(requested = self.path(), "redirecting to login");
            Route::Login
        } else {
            self
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Sign up",
            Route::Dashboard => "Dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The single action offered by the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Logout,
    SignUp,
}

impl NavAction {
    /// Logged-in users get Logout, everyone else Sign Up.
    pub fn for_session(session: &SessionContext) -> Self {
        if session.is_authenticated() {
            NavAction::Logout
        } else {
            NavAction::SignUp
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NavAction::Logout => "Logout",
            NavAction::SignUp => "Sign Up",
        }
    }
}

/// Application title shown in the navbar.
pub const APP_TITLE: &str = "NewsApp";

/// Text of the dashboard placeholder page.
pub const DASHBOARD_WELCOME: &str = "Welcome to the Dashboard!";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionToken;

    fn logged_in() -> SessionContext {
        let session = SessionContext::in_memory();
        session.set_token(Some(SessionToken::new("tok"))).unwrap();
        session
    }

    #[test]
    fn test_paths_roundtrip() {
        for route in [Route::Login, Route::Signup, Route::Dashboard] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/signup/"), Some(Route::Signup));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn test_guard_redirects_dashboard_without_session() {
        let session = SessionContext::in_memory();
        assert_eq!(Route::Dashboard.guard(&session), Route::Login);
        assert_eq!(Route::Signup.guard(&session), Route::Signup);
        assert_eq!(Route::Login.guard(&session), Route::Login);
    }

    #[test]
    fn test_guard_allows_dashboard_with_session() {
        let session = logged_in();
        assert_eq!(Route::Dashboard.guard(&session), Route::Dashboard);
    }

    #[test]
    fn test_nav_action_follows_session() {
        let session = SessionContext::in_memory();
        assert_eq!(NavAction::for_session(&session), NavAction::SignUp);

        session.set_token(Some(SessionToken::new("tok"))).unwrap();
        assert_eq!(NavAction::for_session(&session), NavAction::Logout);

        session.logout().unwrap();
        assert_eq!(NavAction::for_session(&session), NavAction::SignUp);
    }
}
