use super::ScanSetup;
use crate::diagnostics::ScaleLevelReport;
use crate::error::ScanResult;
use crate::features::FeatureExtractor;
use crate::image::ImageU8;
use crate::types::{Window, WindowSet};
use rayon::prelude::*;
use std::time::Instant;

/// Same contract and output order as [`super::enumerate_windows`], with
/// scales processed concurrently.
///
/// Each scale fills its own buffer; buffers are concatenated in scale order.
/// If several scales fail, the error of the lowest scale index is returned.
pub fn enumerate_windows_parallel(
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

    let per_scale: Vec<ScanResult<(Vec<Window>, ScaleLevelReport)>> = scan
        .scales
        .par_iter()
        .enumerate()
        .map(|(scale_index, &scale)| {
            let mut local = Vec::new();
            let report = scan.scan_level(image, scale_index, scale, extractor, &mut local)?;
            Ok((local, report))
        })
        .collect();

    let mut windows = Vec::with_capacity(scan.capacity_hint);
    let mut levels = Vec::with_capacity(per_scale.len());
    for result in per_scale {
        let (mut local, report) = result?;
        windows.append(&mut local);
        levels.push(report);
    }

    Ok(scan.finish(windows, levels, start))
}
