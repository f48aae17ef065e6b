//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`VillaRepository`] - Read-only villa catalog

pub mod villa_repository;

pub use villa_repository::VillaRepository;

#[cfg(test)]
pub use villa_repository::MockVillaRepository;
