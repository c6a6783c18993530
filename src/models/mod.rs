//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`AppLocation`] - Path-based browser location
//! - [`SessionUser`], [`Action`] - Authenticated user and permission map

mod route;
mod session;

pub use route::AppLocation;
pub use session::{Action, SessionUser};
#[cfg(test)]
pub use session::{ModulePermissions, UserPermissions};
