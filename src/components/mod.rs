//! UI components built with Leptos.
//!
//! - [`AuthGate`] - Route authorization wrapper (renders nothing until allowed)
//! - [`Can`] - Permission-aware rendering with an inline "no permission" message
//! - [`Shell`] - Dashboard layout (header, navigation, page area)
//! - [`Toast`] - Error toast fed by API failures

pub mod auth_gate;
pub mod permission;
pub mod shell;
pub mod toast;

pub use auth_gate::AuthGate;
pub use permission::Can;
pub use shell::Shell;
pub use toast::Toast;
