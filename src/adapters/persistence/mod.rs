//! Persistence Adapters - JSONL-based File Storage
//!
//! Implements the `WagerStore` port using append-only JSONL files.
//! No database dependency; the real application database is an external
//! collaborator and this adapter feeds the CLI and integration tests.

pub mod jsonl_store;

pub use jsonl_store::JsonlWagerStore;
