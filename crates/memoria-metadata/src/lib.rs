//! # memoria-metadata
//!
//! SQLite-backed metadata store (§4.B): scheduler state, review log, dedup
//! index/events, clusters/membership, and the briefing queue. Grounded on
//! `cortex-storage`'s pool/migrations/engine split — one write connection,
//! a round-robin read pool, versioned migrations applied at `open()`.

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::MetadataStore;
pub use error::{MetadataError, MetadataResult};
