//! Input/output surface of the batch runner

/// Command-line parsing and run orchestration
pub mod cli;
/// Default paths, naming conventions and generator flags
pub mod configuration;
/// Run-level error types
pub mod error;
/// Plain-text status lines and the generator spinner
pub mod progress;
