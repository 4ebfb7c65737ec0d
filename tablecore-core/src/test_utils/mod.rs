//! Test utilities and helpers for TableCore
//!
//! Common fixtures, assertions and data generators shared by the unit and
//! subsystem tests.

pub mod assertions;
pub mod async_helpers;
pub mod deterministic_rng;
pub mod fixtures;

pub use assertions::*;
pub use async_helpers::*;
pub use deterministic_rng::*;
pub use fixtures::*;
