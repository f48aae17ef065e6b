//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Session and message ID generation

pub mod id_generator;
