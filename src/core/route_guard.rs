//! Route authorization state machine.
//!
//! [`RouteGuard::evaluate`] is run on mount and on every path or query change.
//! It is idempotent: re-running it with unchanged inputs yields the same state
//! and never issues a second redirect within one denial episode.
//!
//! ```text
//! Unmounted --mount--> Checking --evaluate--> Allowed
//!                                        \--> Denied (redirect once)
//! ```

use crate::config::{LOGIN_ROUTE, PUBLIC_ROUTE_PREFIXES, REDIRECT_PARAM};
use crate::core::session::TokenReader;
use crate::models::AppLocation;

/// Observable gate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    /// Storage not yet readable; nothing renders.
    #[default]
    Unmounted,
    /// Mounted, but no evaluation has run yet.
    Checking,
    /// Protected route without an access token.
    Denied,
    /// Public route, or an access token is present.
    Allowed,
}

/// Outcome of a single evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardDecision {
    pub state: GuardState,
    /// Replace-navigation target, present at most once per denial episode.
    pub redirect: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct RouteGuard {
    mounted: bool,
    auth_checked: bool,
    allowed: bool,
    redirected_once: bool,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark client storage as readable.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn state(&self) -> GuardState {
        match (self.mounted, self.auth_checked, self.allowed) {
            (false, _, _) => GuardState::Unmounted,
            (true, false, _) => GuardState::Checking,
            (true, true, true) => GuardState::Allowed,
            (true, true, false) => GuardState::Denied,
        }
    }

    /// Re-derive the gate state for `location`.
    ///
    /// Before [`mount`](Self::mount) no check can run: the decision reports
    /// `Unmounted` (the pre-check state, rendering nothing) rather than
    /// `Checking`, which is reserved for "mounted, not yet evaluated". Either
    /// way nothing renders and no redirect is issued.
    pub fn evaluate(&mut self, location: &AppLocation, tokens: &impl TokenReader) -> GuardDecision {
        if !self.mounted {
            return GuardDecision {
                state: self.state(),
                redirect: None,
            };
        }

        let allowed = is_public_route(&location.path) || tokens.access_token().is_some();
        self.auth_checked = true;
        self.allowed = allowed;

        if allowed {
            self.redirected_once = false;
            return GuardDecision {
                state: GuardState::Allowed,
                redirect: None,
            };
        }

        let redirect = if self.redirected_once {
            None
        } else {
            self.redirected_once = true;
            Some(login_redirect(location))
        };

        GuardDecision {
            state: GuardState::Denied,
            redirect,
        }
    }
}

/// Whether `path` is reachable without an access token.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Login URL that returns the user to `location` afterwards.
///
/// The target is percent-encoded with only RFC 3986 unreserved characters
/// (`A-Z a-z 0-9 - _ . ~`) left as-is, so `!'()*` are escaped too. Any
/// `decodeURIComponent`-style decoder restores the original path.
pub fn login_redirect(location: &AppLocation) -> String {
    format!(
        "{}?{}={}",
        LOGIN_ROUTE,
        REDIRECT_PARAM,
        urlencoding::encode(&location.full_path())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeTokens(Option<&'static str>);

    impl TokenReader for FakeTokens {
        fn access_token(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    const NO_TOKEN: FakeTokens = FakeTokens(None);
    const TOKEN: FakeTokens = FakeTokens(Some("tok"));

    fn mounted() -> RouteGuard {
        let mut guard = RouteGuard::new();
        guard.mount();
        guard
    }

    #[test]
    fn test_unmounted_renders_nothing() {
        let mut guard = RouteGuard::new();
        assert_eq!(guard.state(), GuardState::Unmounted);

        let decision = guard.evaluate(&AppLocation::parse("/resumen"), &NO_TOKEN);
        assert_eq!(decision.state, GuardState::Unmounted);
        assert_eq!(decision.redirect, None);

        guard.mount();
        assert_eq!(guard.state(), GuardState::Checking);
    }

    #[test]
    fn test_public_route_without_token() {
        let mut guard = mounted();
        let decision = guard.evaluate(&AppLocation::parse("/login"), &NO_TOKEN);
        assert_eq!(decision.state, GuardState::Allowed);
        assert_eq!(decision.redirect, None);

        let decision = guard.evaluate(&AppLocation::parse("/reset-password/abc"), &NO_TOKEN);
        assert_eq!(decision.state, GuardState::Allowed);
    }

    #[test]
    fn test_denied_redirects_exactly_once() {
        let mut guard = mounted();
        let location = AppLocation::parse("/resumen");

        let redirects: Vec<String> = (0..3)
            .filter_map(|_| guard.evaluate(&location, &NO_TOKEN).redirect)
            .collect();

        assert_eq!(redirects, vec!["/login?redirect=%2Fresumen".to_string()]);
        assert_eq!(guard.state(), GuardState::Denied);
    }

    #[test]
    fn test_token_allows_protected_route() {
        let mut guard = mounted();
        let decision = guard.evaluate(&AppLocation::parse("/resumen?x=1"), &TOKEN);
        assert_eq!(decision.state, GuardState::Allowed);
        assert_eq!(decision.redirect, None);
        assert_eq!(guard.state(), GuardState::Allowed);
    }

    #[test]
    fn test_allowed_rearms_redirect() {
        let mut guard = mounted();
        let protected = AppLocation::parse("/planes");

        assert!(guard.evaluate(&protected, &NO_TOKEN).redirect.is_some());
        assert!(guard.evaluate(&protected, &NO_TOKEN).redirect.is_none());

        guard.evaluate(&AppLocation::parse("/login"), &NO_TOKEN);
        assert!(guard.evaluate(&protected, &NO_TOKEN).redirect.is_some());
    }

    #[test]
    fn test_redirect_encodes_query() {
        assert_eq!(
            login_redirect(&AppLocation::parse("/resumen?x=1&y=a b")),
            "/login?redirect=%2Fresumen%3Fx%3D1%26y%3Da%20b"
        );
    }

    #[test]
    fn test_redirect_escapes_sub_delims() {
        let target = login_redirect(&AppLocation::parse("/a(1)!*'~_-."));
        assert_eq!(target, "/login?redirect=%2Fa%281%29%21%2A%27~_-.");

        let encoded = target.strip_prefix("/login?redirect=").unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), "/a(1)!*'~_-.");
    }

    #[test]
    fn test_public_prefixes() {
        assert!(is_public_route("/login"));
        assert!(is_public_route("/forgot-password"));
        assert!(is_public_route("/reset-password?token=1"));
        assert!(!is_public_route("/"));
        assert!(!is_public_route("/resumen"));
        assert!(!is_public_route("/usuarios/login"));
    }
}
