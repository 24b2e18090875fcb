//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `WagerStore`: Wager history, session aggregates and upcoming fixtures

pub mod wager_store;

pub use wager_store::WagerStore;
