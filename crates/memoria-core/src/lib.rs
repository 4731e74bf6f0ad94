//! # memoria-core
//!
//! Foundation crate for the memoria memory engine.
//! Defines the record types, scheduler/dedup/cluster value types, the oracle
//! abstraction, config, constants, and the umbrella error. Every other crate
//! in the workspace depends on this.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod errors;
pub mod oracle;
pub mod record;
pub mod scheduler;
pub mod wordset;

pub use config::MemoriaConfig;
pub use errors::{MemoriaError, MemoriaResult};
pub use oracle::{Oracle, OracleOutcome, Verdict};
pub use record::{MemoryRecord, MemoryRecordPatch, Scope};
pub use scheduler::{Grade, SchedulerState};
