//! Browser location as seen by the router and the auth gate.

/// Current path and query string.
///
/// `query` is either empty or starts with `?`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppLocation {
    pub path: String,
    pub query: String,
}

impl AppLocation {
    /// Build a location from `location.pathname` and `location.search`.
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let path = path.into();
        let query = query.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            query: if query == "?" { String::new() } else { query },
        }
    }

    /// Parse a relative URL such as `/resumen?x=1`.
    ///
    /// Any fragment is dropped.
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        match url.find('?') {
            Some(idx) => Self::new(&url[..idx], &url[idx..]),
            None => Self::new(url, ""),
        }
    }

    /// Path followed by the query string.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.path, self.query)
    }

    /// Get current location from the browser URL.
    pub fn current() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Self::default();
        };
        Self::new(
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default(),
        )
    }
}
