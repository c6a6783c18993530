//! Core client logic for the dashboard.
//!
//! This module provides:
//! - [`envelope`] response normalization over the backend's envelope shapes
//! - [`permissions`] module/action permission checks
//! - [`route_guard`] the route authorization state machine
//! - [`session`] read-only access to the persisted session

pub mod envelope;
pub mod error;
pub mod permissions;
pub mod route_guard;
pub mod session;
