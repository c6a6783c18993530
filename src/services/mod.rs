//! Backend services used by the shell.

pub mod auth;
