//! # memoria-maintenance
//!
//! Idempotent maintenance pass (§4.K): decay, archival, stats, health check,
//! plus the weekly briefing queue scheduling (§4.M).

pub mod archival_pass;
pub mod briefing;
pub mod decay_pass;
pub mod engine;
pub mod error;
pub mod health;
pub mod stats;

pub use engine::{MaintenanceReport, MaintenanceRunner};
pub use error::{MaintenanceError, MaintenanceResult};
pub use health::HealthReport;
pub use stats::Stats;
