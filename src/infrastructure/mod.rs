//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`catalog`] - Built-in villa catalog
//! - [`notification`] - Email and log-only reservation senders
//! - [`session`] - In-memory booking session store

pub mod catalog;
pub mod notification;
pub mod session;
