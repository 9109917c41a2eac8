use super::params::ScanParams;
use crate::error::{ConfigError, ScanResult};
use crate::features::FeatureExtractor;
use crate::image::ImageU8;
use crate::planner::{plan_scales, ScalePlan};
use crate::types::WindowSet;
use log::debug;

/// Runs multiscale window scans with fixed parameters.
pub struct WindowScanner {
    params: ScanParams,
    extractor: Option<Box<dyn FeatureExtractor>>,
}

impl WindowScanner {
    pub fn new(params: ScanParams) -> Self {
        Self {
            params,
            extractor: None,
        }
    }

    /// Compute features for every window with `extractor`.
    pub fn with_extractor(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    /// Scale plan the scanner would use for an image of this size.
    pub fn plan(&self, image_rows: usize, image_cols: usize) -> ScanResult<ScalePlan> {
        let p = &self.params;
        plan_scales(
            image_rows,
            image_cols,
            p.win_rows,
            p.win_cols,
            p.scale_ratio,
            p.max_num_scales,
        )
    }

    /// Enumerate every window of `image` (and its features, if configured).
    pub fn scan(&self, image: ImageU8<'_>) -> ScanResult<WindowSet> {
        if self.params.stride == 0 {
            return Err(ConfigError::ZeroStride.into());
        }
        let plan = self.plan(image.h, image.w)?;
        let extractor = self.extractor.as_deref();
        debug!(
            "WindowScanner::scan {}x{} scales={:?} features={}",
            image.w,
            image.h,
            plan.scales,
            extractor.is_some()
        );
        self.enumerate(image, &plan, extractor)
    }

    #[cfg(not(feature = "parallel"))]
    fn enumerate(
        &self,
        image: ImageU8<'_>,
        plan: &ScalePlan,
        extractor: Option<&dyn FeatureExtractor>,
    ) -> ScanResult<WindowSet> {
        crate::windows::enumerate_windows(
            image,
            plan.win_rows,
            plan.win_cols,
            plan.scale_ratio,
            plan.num_scales(),
            self.params.stride,
            extractor,
        )
    }

    #[cfg(feature = "parallel")]
    fn enumerate(
        &self,
        image: ImageU8<'_>,
        plan: &ScalePlan,
        extractor: Option<&dyn FeatureExtractor>,
    ) -> ScanResult<WindowSet> {
        crate::windows::enumerate_windows_parallel(
            image,
            plan.win_rows,
            plan.win_cols,
            plan.scale_ratio,
            plan.num_scales(),
            self.params.stride,
            extractor,
        )
    }
}

impl std::fmt::Debug for WindowScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowScanner")
            .field("params", &self.params)
            .field("extractor", &self.extractor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::features::RawPixels;

    #[test]
    fn scanner_matches_free_function() {
        let (w, h) = (120, 100);
        let data: Vec<u8> = (0..w * h).map(|i| (i % 253) as u8).collect();
        let image = ImageU8::gray(w, h, &data);
        let params = ScanParams {
            win_rows: 24,
            win_cols: 32,
            scale_ratio: 1.5,
            max_num_scales: 4,
            stride: 8,
        };
        let scanner = WindowScanner::new(params.clone()).with_extractor(Box::new(RawPixels));
        let via_scanner = scanner.scan(image).expect("scan");
        let direct = crate::windows::multiscale_sliding_windows(
            image,
            params.win_rows,
            params.win_cols,
            params.scale_ratio,
            params.max_num_scales,
            params.stride,
            Some(&RawPixels),
        )
        .expect("direct");
        assert_eq!(via_scanner.windows, direct.windows);
        assert_eq!(via_scanner.scales, vec![1.0, 1.5, 2.25, 3.375]);
    }

    #[test]
    fn zero_stride_is_rejected() {
        let data = vec![0u8; 64];
        let scanner = WindowScanner::new(ScanParams {
            win_rows: 4,
            win_cols: 4,
            stride: 0,
            ..ScanParams::default()
        });
        assert!(matches!(
            scanner.scan(ImageU8::gray(8, 8, &data)),
            Err(ScanError::InvalidConfiguration(ConfigError::ZeroStride))
        ));
    }
}
