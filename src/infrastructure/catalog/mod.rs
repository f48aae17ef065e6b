//! Villa catalog implementations.

mod static_villa_repository;

pub use static_villa_repository::StaticVillaRepository;
