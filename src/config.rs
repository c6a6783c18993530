//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! The API base URL is resolved at compile time from `API_BASE_URL`.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the shell header.
pub const APP_NAME: &str = "Performance Admin";

// =============================================================================
// Network Configuration
// =============================================================================

/// Base URL prepended to every API path.
pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => "/api",
};

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 15000;

/// Header carrying the active business unit.
pub const BUSINESS_UNIT_HEADER: &str = "x-business-unit-id";

// =============================================================================
// Session Storage Keys
// =============================================================================

/// localStorage key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// localStorage key holding the selected business unit id.
pub const BUSINESS_UNIT_KEY: &str = "business_unit_id";

/// localStorage key holding the cached session user (JSON).
pub const SESSION_USER_KEY: &str = "user";

// =============================================================================
// Routing
// =============================================================================

/// Login route that denied navigations are redirected to.
pub const LOGIN_ROUTE: &str = "/login";

/// Query parameter carrying the originally requested location.
pub const REDIRECT_PARAM: &str = "redirect";

/// Routes reachable without an access token (prefix match).
pub const PUBLIC_ROUTE_PREFIXES: &[&str] = &["/login", "/forgot-password", "/reset-password"];

/// Dashboard sections and the permission module guarding each.
///
/// `(route prefix, module key, title)`
pub const ROUTE_MODULES: &[(&str, &str, &str)] = &[
    ("/resumen", "dashboard", "Resumen"),
    ("/planes", "strategic_plans", "Planes estratégicos"),
    ("/objetivos", "objectives", "Objetivos"),
    ("/proyectos", "projects", "Proyectos"),
    ("/unidades", "business_units", "Unidades de negocio"),
    ("/usuarios", "users", "Usuarios"),
    ("/permisos", "permissions", "Permisos"),
];

// =============================================================================
// UI Configuration
// =============================================================================

/// How long an error toast stays visible, in milliseconds.
pub const TOAST_TIMEOUT_MS: u32 = 5000;

// =============================================================================
// Error Messages
// =============================================================================

/// Message used when a failed envelope carries no `message`.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "Request failed";

/// Message used when a failed payload cannot be decoded.
pub const UNEXPECTED_PAYLOAD_MESSAGE: &str = "Unexpected response payload";

/// Generic message shown when nothing better is available.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Message shown when an error object has an empty message.
pub const EMPTY_ERROR_MESSAGE: &str = "Error";

/// Inline message rendered in place of content the user may not see.
pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to view this section.";
