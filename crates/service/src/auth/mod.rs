//! Account registration, password login and JWT issuance.
//!
//! Split in three layers: plain domain types, a persistence trait with a
//! SeaORM implementation and an in-memory mock, and the service holding the
//! hashing and token logic.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthService, TokenSettings};
