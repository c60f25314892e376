//! Batch driver for density image generation from point-cloud scans
//!
//! Each `.ply` file in an input directory is paired with the annotation file
//! sharing its base name. The external density-image generator runs once per
//! pair, and its two output images are checked on disk afterwards. Items are
//! processed strictly one after another, and no single item can abort the run.

#![forbid(unsafe_code)]

/// Discovery, generator invocation, output checks and the per-item loop
pub mod batch;
/// Command-line surface, configuration, error handling and progress output
pub mod io;

pub use io::error::{BatchError, Result};
