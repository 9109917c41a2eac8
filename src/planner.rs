//! Scale planning for the multiscale window scan.
//!
//! Purpose
//! - Decide how many scales the scan visits and the resize factor of each,
//!   without probing window sizes in a loop.
//! - Estimate an upper bound on the number of windows so the output can be
//!   allocated once.
//!
//! Scale count
//! - A window of `win × ratio^s` fits an extent `n` while
//!   `s ≤ ln(n / win) / ln(ratio)`. Taking the floor for rows and columns,
//!   the minimum of both, plus one for the unscaled level, gives the count.
//!   It is capped by `max_num_scales`. `probe_num_scales` keeps the loop form
//!   as a reference.
//!
//! Window bound
//! - Per scale and axis: `floor(n / (stride·ratio^s)) − floor(win / stride) + 1`
//!   plus one pixel-rounding margin, multiplied over both axes and summed.
//!   The bound is a capacity hint only; it never under-counts.
use crate::error::{ConfigError, ScanResult};
use log::debug;
use serde::Serialize;

/// Tolerance added to the log quotient before flooring, so exact fits such
/// as `64·3³ == 1728` survive rounding in `ln`.
const LOG_EPS: f64 = 1e-9;

/// Planned scales for one image/window configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalePlan {
    pub image_rows: usize,
    pub image_cols: usize,
    pub win_rows: usize,
    pub win_cols: usize,
    pub scale_ratio: f64,
    /// `scales[s] == scale_ratio^s`, `scales[0] == 1.0`.
    pub scales: Vec<f64>,
}

impl ScalePlan {
    pub fn num_scales(&self) -> usize {
        self.scales.len()
    }

    pub fn scale(&self, index: usize) -> Option<f64> {
        self.scales.get(index).copied()
    }

    /// Upper bound on the windows a scan with `stride` produces under this plan.
    pub fn window_count_upper_bound(&self, stride: usize) -> usize {
        window_count_upper_bound(
            self.image_rows,
            self.image_cols,
            self.win_rows,
            self.win_cols,
            &self.scales,
            stride,
        )
    }
}

/// Plan the scales for scanning an `image_rows × image_cols` image with a
/// `win_rows × win_cols` window.
pub fn plan_scales(
    image_rows: usize,
    image_cols: usize,
    win_rows: usize,
    win_cols: usize,
    scale_ratio: f64,
    max_num_scales: usize,
) -> ScanResult<ScalePlan> {
    validate_scale_ratio(scale_ratio)?;
    if max_num_scales == 0 {
        return Err(ConfigError::ZeroScales.into());
    }
    validate_window(image_rows, image_cols, win_rows, win_cols)?;

    let available = analytic_num_scales(image_rows, image_cols, win_rows, win_cols, scale_ratio);
    let num_scales = available.min(max_num_scales);
    let scales = scale_factors(scale_ratio, num_scales);
    debug!(
        "plan_scales image={}x{} win={}x{} ratio={:.3} -> {} scales ({} available, cap {})",
        image_rows,
        image_cols,
        win_rows,
        win_cols,
        scale_ratio,
        num_scales,
        available,
        max_num_scales
    );

    Ok(ScalePlan {
        image_rows,
        image_cols,
        win_rows,
        win_cols,
        scale_ratio,
        scales,
    })
}

/// Closed-form count of scales at which the window still fits both extents.
///
/// Callers must ensure `0 < win ≤ image` on both axes and `scale_ratio > 1`.
pub fn analytic_num_scales(
    image_rows: usize,
    image_cols: usize,
    win_rows: usize,
    win_cols: usize,
    scale_ratio: f64,
) -> usize {
    let ln_ratio = scale_ratio.ln();
    let levels = |extent: usize, win: usize| {
        ((extent as f64 / win as f64).ln() / ln_ratio + LOG_EPS).floor()
    };
    let steps = levels(image_rows, win_rows).min(levels(image_cols, win_cols));
    steps.max(0.0) as usize + 1
}

/// Reference count: grow the window by `scale_ratio` until it stops fitting
/// or `max_num_scales` is reached.
pub fn probe_num_scales(
    image_rows: usize,
    image_cols: usize,
    win_rows: usize,
    win_cols: usize,
    scale_ratio: f64,
    max_num_scales: usize,
) -> usize {
    let fits = |win: usize, extent: usize, scale: f64| {
        win as f64 * scale <= extent as f64 * (1.0 + LOG_EPS)
    };
    let mut count = 0;
    let mut scale = 1.0f64;
    while count < max_num_scales
        && fits(win_rows, image_rows, scale)
        && fits(win_cols, image_cols, scale)
    {
        count += 1;
        scale *= scale_ratio;
    }
    count
}

/// `scale_ratio^s` for `s` in `0..num_scales`.
pub fn scale_factors(scale_ratio: f64, num_scales: usize) -> Vec<f64> {
    (0..num_scales)
        .map(|s| scale_ratio.powi(s as i32))
        .collect()
}

/// Upper bound on the total number of windows over `scales`.
pub fn window_count_upper_bound(
    image_rows: usize,
    image_cols: usize,
    win_rows: usize,
    win_cols: usize,
    scales: &[f64],
    stride: usize,
) -> usize {
    let stride = stride.max(1);
    let per_axis = |extent: usize, win: usize, stride_scale: f64| -> usize {
        let n = (extent as f64 / stride_scale).floor() as i64 - (win / stride) as i64 + 1;
        n.max(0) as usize + 1
    };
    scales
        .iter()
        .map(|&scale| {
            let stride_scale = stride as f64 * scale;
            per_axis(image_rows, win_rows, stride_scale)
                * per_axis(image_cols, win_cols, stride_scale)
        })
        .sum()
}

pub(crate) fn validate_scale_ratio(scale_ratio: f64) -> Result<(), ConfigError> {
    if scale_ratio.is_finite() && scale_ratio > 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ScaleRatioTooSmall { scale_ratio })
    }
}

pub(crate) fn validate_window(
    image_rows: usize,
    image_cols: usize,
    win_rows: usize,
    win_cols: usize,
) -> Result<(), ConfigError> {
    if image_rows == 0 || image_cols == 0 {
        return Err(ConfigError::EmptyImage {
            width: image_cols,
            height: image_rows,
        });
    }
    if win_rows == 0 || win_cols == 0 {
        return Err(ConfigError::ZeroWindow { win_rows, win_cols });
    }
    if win_rows > image_rows || win_cols > image_cols {
        return Err(ConfigError::WindowExceedsImage {
            win_rows,
            win_cols,
            image_rows,
            image_cols,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn square_example_plans_two_scales() {
        let plan = plan_scales(256, 256, 64, 64, 2.0, 2).expect("valid plan");
        assert_eq!(plan.scales, vec![1.0, 2.0]);
        // 8·8 + 4·4 with the per-axis margin.
        assert_eq!(plan.window_count_upper_bound(32), 80);
    }

    #[test]
    fn cap_limits_available_scales() {
        assert_eq!(analytic_num_scales(256, 256, 64, 64, 2.0), 3);
        let plan = plan_scales(256, 256, 64, 64, 2.0, 10).expect("valid plan");
        assert_eq!(plan.num_scales(), 3);
        let plan = plan_scales(256, 256, 64, 64, 2.0, 1).expect("valid plan");
        assert_eq!(plan.scales, vec![1.0]);
    }

    #[test]
    fn narrower_axis_bounds_the_count() {
        // rows allow 1024/16 = 64 = 2^6, cols only 48/16 = 3 -> floor(log2 3) = 1.
        assert_eq!(analytic_num_scales(1024, 48, 16, 16, 2.0), 2);
    }

    #[test]
    fn exact_integer_power_fits() {
        assert_eq!(analytic_num_scales(1728, 1728, 64, 64, 3.0), 4);
        assert_eq!(probe_num_scales(1728, 1728, 64, 64, 3.0, usize::MAX), 4);
        assert_eq!(analytic_num_scales(1727, 1728, 64, 64, 3.0), 3);
    }

    #[test]
    fn window_equal_to_image_yields_single_scale() {
        let plan = plan_scales(50, 70, 50, 70, 1.1, 5).expect("valid plan");
        assert_eq!(plan.scales, vec![1.0]);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let cases = [
            plan_scales(100, 100, 101, 10, 2.0, 3),
            plan_scales(100, 100, 10, 101, 2.0, 3),
            plan_scales(100, 100, 0, 10, 2.0, 3),
            plan_scales(100, 100, 10, 10, 1.0, 3),
            plan_scales(100, 100, 10, 10, f64::NAN, 3),
            plan_scales(100, 100, 10, 10, 2.0, 0),
            plan_scales(0, 100, 10, 10, 2.0, 3),
        ];
        for result in cases {
            assert!(
                matches!(result, Err(ScanError::InvalidConfiguration(_))),
                "expected InvalidConfiguration, got {result:?}"
            );
        }
    }
}
