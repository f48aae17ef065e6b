//! Server-rendered booking flow.
//!
//! Provides the four booking steps as HTML pages driven by plain form posts.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Page rendering and form action handlers
//! - [`middleware`] - Booking session cookie
//! - [`routes`] - Booking route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
