//! Sequential batch processing of point-cloud files
//!
//! This module contains:
//! - Input discovery and deterministic path derivation
//! - The external generator contract and its subprocess implementation
//! - Output artifact verification
//! - Per-item outcomes and the run loop itself

/// External generator contract and subprocess implementation
pub mod generator;
/// Input discovery and path derivation from base names
pub mod layout;
/// Per-item outcomes and run summaries
pub mod outcome;
/// The iterate-match-invoke-verify loop
pub mod runner;
/// Output artifact existence and readability checks
pub mod verify;

pub use layout::BatchLayout;
pub use runner::BatchRunner;
