#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod features;
pub mod image;
pub mod planner;
pub mod scanner;
pub mod types;
pub mod windows;

// Building blocks and tooling support.
pub mod config;
pub mod diagnostics;
pub mod pyramid;

// --- High-level re-exports -------------------------------------------------

// Main entry points: free functions + configured scanner.
pub use crate::planner::{plan_scales, ScalePlan};
pub use crate::scanner::{ScanParams, WindowScanner};
pub use crate::windows::{enumerate_windows, multiscale_sliding_windows};

#[cfg(feature = "parallel")]
pub use crate::windows::enumerate_windows_parallel;

// Results and errors.
pub use crate::error::{ConfigError, ExtractError, ScanError, ScanResult};
pub use crate::features::{extractor_fn, FeatureExtractor, RawPixels};
pub use crate::types::{FeatureVector, Window, WindowRect, WindowSet};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use sliding_windows::prelude::*;
///
/// # fn main() -> Result<(), ScanError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8::gray(w, h, &gray);
///
/// let scanner = WindowScanner::new(ScanParams {
///     win_rows: 64,
///     win_cols: 32,
///     ..Default::default()
/// });
///
/// let set = scanner.scan(img)?;
/// println!("windows={} scales={}", set.len(), set.num_scales());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageBufU8, ImageU8};
    pub use crate::{
        FeatureExtractor, RawPixels, ScanError, ScanParams, WindowRect, WindowScanner, WindowSet,
    };
}
