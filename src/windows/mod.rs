//! Multiscale window enumeration.
//!
//! For each scale `s` the image is resampled by `scale[s] = ratio^s`, a fixed
//! `win_rows × win_cols` window slides over the resampled grid with the given
//! stride, and each top-left `(i, j)` is mapped back to the original image as
//! `(round(j·scale), round(i·scale), round(win_cols·scale), round(win_rows·scale))`.
//! When an extractor is supplied it sees the resampled window pixels, never a
//! crop of the original.
//!
//! Each resampled level lives only while its windows are enumerated. A level
//! smaller than the window contributes nothing; a level that resamples to zero
//! pixels is an error.

#[cfg(feature = "parallel")]
mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::enumerate_windows_parallel;

use crate::diagnostics::ScaleLevelReport;
use crate::error::{ConfigError, ScanError, ScanResult};
use crate::features::FeatureExtractor;
use crate::image::ImageU8;
use crate::planner::{self, plan_scales};
use crate::pyramid::resample_level;
use crate::pyramid::scaling::LevelScaling;
use crate::types::{Window, WindowSet};
use log::{debug, warn};
use std::time::Instant;

/// Plan the scales for `image` and enumerate every window.
///
/// Returns one record per window, in scale/row/column order. With `extractor`
/// set to `None` every record carries `features: None`.
pub fn multiscale_sliding_windows(
    image: ImageU8<'_>,
    win_rows: usize,
    win_cols: usize,
    scale_ratio: f64,
    max_num_scales: usize,
    stride: usize,
    extractor: Option<&dyn FeatureExtractor>,
) -> ScanResult<WindowSet> {
    validate_image(image)?;
    if stride == 0 {
        return Err(ConfigError::ZeroStride.into());
    }
    let plan = plan_scales(image.h, image.w, win_rows, win_cols, scale_ratio, max_num_scales)?;
    enumerate_windows(
        image,
        win_rows,
        win_cols,
        scale_ratio,
        plan.num_scales(),
        stride,
        extractor,
    )
}

/// Enumerate windows over `num_scales` scales of `image`.
///
/// `num_scales` is taken as given; scales whose resampled image is smaller
/// than the window yield no windows.
pub fn enumerate_windows(
    image: ImageU8<'_>,
    win_rows: usize,
    win_cols: usize,
    scale_ratio: f64,
    num_scales: usize,
    stride: usize,
    extractor: Option<&dyn FeatureExtractor>,
) -> ScanResult<WindowSet> {
    let start = Instant::now();
    let scan = ScanSetup::new(image, win_rows, win_cols, scale_ratio, num_scales, stride)?;

    let mut windows = Vec::with_capacity(scan.capacity_hint);
    let mut levels = Vec::with_capacity(scan.scales.len());
    for (scale_index, &scale) in scan.scales.iter().enumerate() {
        levels.push(scan.scan_level(image, scale_index, scale, extractor, &mut windows)?);
    }

    Ok(scan.finish(windows, levels, start))
}

/// Validated inputs shared by the sequential and parallel enumerators.
pub(crate) struct ScanSetup {
    pub win_rows: usize,
    pub win_cols: usize,
    pub stride: usize,
    pub scales: Vec<f64>,
    pub capacity_hint: usize,
}

impl ScanSetup {
    pub(crate) fn new(
        image: ImageU8<'_>,
        win_rows: usize,
        win_cols: usize,
        scale_ratio: f64,
        num_scales: usize,
        stride: usize,
    ) -> ScanResult<Self> {
        validate_image(image)?;
        planner::validate_scale_ratio(scale_ratio)?;
        if stride == 0 {
            return Err(ConfigError::ZeroStride.into());
        }
        if num_scales == 0 {
            return Err(ConfigError::ZeroScales.into());
        }
        planner::validate_window(image.h, image.w, win_rows, win_cols)?;

        let scales = planner::scale_factors(scale_ratio, num_scales);
        let capacity_hint = planner::window_count_upper_bound(
            image.h,
            image.w,
            win_rows,
            win_cols,
            &scales,
            stride,
        );
        debug!(
            "enumerate_windows image={}x{}x{} win={}x{} stride={} scales={} capacity_hint={}",
            image.w, image.h, image.channels, win_rows, win_cols, stride, num_scales, capacity_hint
        );
        Ok(Self {
            win_rows,
            win_cols,
            stride,
            scales,
            capacity_hint,
        })
    }

    /// Enumerate the windows of one scale into `out`.
    pub(crate) fn scan_level(
        &self,
        image: ImageU8<'_>,
        scale_index: usize,
        scale: f64,
        extractor: Option<&dyn FeatureExtractor>,
        out: &mut Vec<Window>,
    ) -> ScanResult<ScaleLevelReport> {
        let level_start = Instant::now();
        let resampled;
        let level = if scale_index == 0 {
            image
        } else {
            resampled = resample_level(image, scale, scale_index)?;
            resampled.as_view()
        };

        let mapping = LevelScaling::new(scale);
        let before = out.len();
        if level.h >= self.win_rows && level.w >= self.win_cols {
            let last_row = level.h - self.win_rows;
            let last_col = level.w - self.win_cols;
            for row in (0..=last_row).step_by(self.stride) {
                for col in (0..=last_col).step_by(self.stride) {
                    let rect = mapping.window_rect(row, col, self.win_rows, self.win_cols);
                    let features = match extractor {
                        Some(ex) => {
                            let patch = level.sub_view(col, row, self.win_cols, self.win_rows);
                            let feats = ex.extract(patch).map_err(|source| {
                                ScanError::Extraction {
                                    scale_index,
                                    row,
                                    col,
                                    source,
                                }
                            })?;
                            Some(feats)
                        }
                        None => None,
                    };
                    out.push(Window {
                        rect,
                        scale_index,
                        features,
                    });
                }
            }
        } else {
            warn!(
                "scale {} resamples to {}x{}, smaller than the {}x{} window; no windows",
                scale_index, level.w, level.h, self.win_cols, self.win_rows
            );
        }

        let report = ScaleLevelReport {
            scale_index,
            scale,
            width: level.w,
            height: level.h,
            windows: out.len() - before,
            elapsed_ms: level_start.elapsed().as_secs_f64() * 1000.0,
        };
        debug!("{}", report.summary());
        Ok(report)
    }

    pub(crate) fn finish(
        self,
        windows: Vec<Window>,
        levels: Vec<ScaleLevelReport>,
        start: Instant,
    ) -> WindowSet {
        debug_assert!(
            windows.len() <= self.capacity_hint,
            "capacity hint {} under-counted {} windows",
            self.capacity_hint,
            windows.len()
        );
        WindowSet {
            scales: self.scales,
            windows,
            levels,
            capacity_hint: self.capacity_hint,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

fn validate_image(image: ImageU8<'_>) -> Result<(), ConfigError> {
    if image.is_empty() {
        return Err(ConfigError::EmptyImage {
            width: image.w,
            height: image.h,
        });
    }
    if !image.is_well_formed() {
        return Err(ConfigError::MalformedImage {
            width: image.w,
            height: image.h,
            channels: image.channels,
            stride: image.stride,
            len: image.data.len(),
        });
    }
    Ok(())
}
