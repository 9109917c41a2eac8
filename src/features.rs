//! Feature-extractor capability consumed by the window enumerator.
//!
//! An extractor receives the resampled pixels of one window as a borrowed
//! `ImageU8` view (same channel layout as the scanned image) and returns an
//! opaque `FeatureVector`. Failures abort the scan, so rectangles and
//! features can never drift out of alignment.
//!
//! `RawPixels` is a reference extractor: intensity of each pixel scaled to
//! `[0, 1]`, flattened row-major.
use crate::error::ExtractError;
use crate::image::{ImageU8, ImageView};
use crate::types::FeatureVector;

pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, window: ImageU8<'_>) -> Result<FeatureVector, ExtractError>;
}

/// Adapter turning a closure into a `FeatureExtractor`.
#[derive(Clone, Copy, Debug)]
pub struct FnExtractor<F>(F);

/// Wrap a closure as a feature extractor.
///
/// ```
/// use sliding_windows::features::{extractor_fn, FeatureExtractor};
/// use sliding_windows::image::ImageU8;
///
/// let mean = extractor_fn(|w: ImageU8<'_>| {
///     let n = (w.w * w.h * w.channels).max(1) as f64;
///     let sum: f64 = (0..w.h)
///         .flat_map(|y| (0..w.w).map(move |x| (x, y)))
///         .flat_map(|(x, y)| w.pixel(x, y).iter().map(|&v| v as f64))
///         .sum();
///     Ok(vec![sum / n])
/// });
/// let data = [10u8, 30, 50, 70];
/// let v = mean.extract(ImageU8::gray(2, 2, &data)).unwrap();
/// assert_eq!(v, vec![40.0]);
/// ```
pub fn extractor_fn<F>(f: F) -> FnExtractor<F>
where
    F: Fn(ImageU8<'_>) -> Result<FeatureVector, ExtractError> + Send + Sync,
{
    FnExtractor(f)
}

impl<F> FeatureExtractor for FnExtractor<F>
where
    F: Fn(ImageU8<'_>) -> Result<FeatureVector, ExtractError> + Send + Sync,
{
    #[inline]
    fn extract(&self, window: ImageU8<'_>) -> Result<FeatureVector, ExtractError> {
        (self.0)(window)
    }
}

impl<T: FeatureExtractor + ?Sized> FeatureExtractor for Box<T> {
    #[inline]
    fn extract(&self, window: ImageU8<'_>) -> Result<FeatureVector, ExtractError> {
        (**self).extract(window)
    }
}

/// Raw intensity descriptor: one value in `[0, 1]` per pixel, row-major.
///
/// Colour pixels are reduced with the ITU-R BT.601 luma weights on RGB
/// order; an alpha channel (2 or 4 channels) is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawPixels;

impl FeatureExtractor for RawPixels {
    fn extract(&self, window: ImageU8<'_>) -> Result<FeatureVector, ExtractError> {
        let channels = window.channels;
        if !(1..=4).contains(&channels) {
            return Err(format!("raw pixel features support 1-4 channels, got {channels}").into());
        }
        let mut out = Vec::with_capacity(window.w * window.h);
        for row in window.rows() {
            out.extend(
                row.chunks_exact(channels)
                    .map(|px| (intensity(px) / 255.0).clamp(0.0, 1.0)),
            );
        }
        Ok(out)
    }
}

/// Luma of one pixel on the 0..=255 scale.
#[inline]
pub fn intensity(px: &[u8]) -> f64 {
    match px.len() {
        1 | 2 => px[0] as f64,
        _ => 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn raw_pixels_normalizes_gray() {
        let data = [0u8, 51, 255, 102, 204, 153];
        let feats = RawPixels
            .extract(ImageU8::gray(3, 2, &data))
            .expect("gray is supported");
        let expected = [0.0, 0.2, 1.0, 0.4, 0.8, 0.6];
        assert_eq!(feats.len(), expected.len());
        for (got, want) in feats.iter().zip(expected) {
            assert!(approx_eq(*got, want), "got {got}, want {want}");
        }
    }

    #[test]
    fn raw_pixels_uses_luma_for_color() {
        let data = [255u8, 0, 0, 0, 255, 0, 255, 255, 255];
        let feats = RawPixels
            .extract(ImageU8::new(3, 1, 3, &data))
            .expect("rgb is supported");
        assert!(approx_eq(feats[0], 0.299));
        assert!(approx_eq(feats[1], 0.587));
        assert!((feats[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn raw_pixels_follows_sub_view_rows() {
        let data: Vec<u8> = (0..16).map(|v| v * 10).collect();
        let img = ImageU8::gray(4, 4, &data);
        let feats = RawPixels.extract(img.sub_view(1, 2, 2, 2)).expect("gray");
        let expected: Vec<f64> = [90u8, 100, 130, 140]
            .iter()
            .map(|&v| v as f64 / 255.0)
            .collect();
        assert_eq!(feats, expected);
    }

    #[test]
    fn raw_pixels_rejects_unsupported_layout() {
        let data = [0u8; 5];
        assert!(RawPixels.extract(ImageU8::new(1, 1, 5, &data)).is_err());
    }

    #[test]
    fn boxed_closure_extractor_dispatches() {
        let boxed: Box<dyn FeatureExtractor> =
            Box::new(extractor_fn(|w: ImageU8<'_>| Ok(vec![w.w as f64, w.h as f64])));
        let data = [0u8; 6];
        assert_eq!(
            boxed.extract(ImageU8::gray(3, 2, &data)).expect("closure"),
            vec![3.0, 2.0]
        );
    }
}
