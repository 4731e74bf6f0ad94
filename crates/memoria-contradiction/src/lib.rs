//! # memoria-contradiction
//!
//! Candidate-pair selection and oracle-backed resolution for contradictory
//! memories (§4.E). Selection is pure word-overlap math; resolution delegates
//! to an external `ContradictionOracle` with a best-effort fallback.

pub mod candidate;
pub mod error;
pub mod resolve;

pub use candidate::{select, Candidate};
pub use error::{ContradictionError, ContradictionResult};
pub use resolve::{resolve, Action, Resolution};
