//! Configured window scanner.
//!
//! Overview
//! - [`ScanParams`] carries the window size, scale ratio, scale cap and
//!   stride, with serde support so tools can read them from JSON.
//! - [`WindowScanner`] owns the parameters plus an optional feature
//!   extractor and runs plan → enumerate for each image it is given.
//!
//! With the `parallel` feature the scanner enumerates scales concurrently;
//! the output is identical to the sequential path.

pub mod params;
mod pipeline;

pub use params::ScanParams;
pub use pipeline::WindowScanner;
