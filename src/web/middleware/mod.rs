//! Web-specific middleware.

pub mod session;
