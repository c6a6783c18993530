//! Utility modules for browser and network access.
//!
//! Provides:
//! - [`dom`] - window, localStorage and history helpers
//! - [`api_get`] - API calls with timeout and envelope normalization

pub mod dom;
mod fetch;

pub use fetch::api_get;
