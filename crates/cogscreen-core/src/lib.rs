//! cogscreen-core: Assessment state machine and scoring engine.
//!
//! This crate defines the subtests, the countdown timer, the session
//! orchestrator that sequences them, and the aggregation of partial scores
//! into a normalized result.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod random;
pub mod report;
pub mod results;
pub mod session;
pub mod subtests;
pub mod timer;
pub mod wordbank;
