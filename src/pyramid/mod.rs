//! Per-scale resampling for the multiscale window scan.
//!
//! Unlike a dyadic pyramid, every level is resampled directly from the
//! original image by its own factor `scale = ratio^s`, so errors never
//! accumulate across levels.
//!
//! Design
//! - Level size is `floor(extent / scale)` on each axis, not the rounded
//!   size a generic `resize(1/scale)` would give: a 255-pixel axis at scale 2
//!   becomes 127, not 128. Flooring keeps every window mapped back through
//!   `scale` within one pixel of the original image; rounding up can push the
//!   last windows of coarse levels further out.
//! - Sampling is bilinear with pixel-centre alignment:
//!   `src = (dst + 0.5) * scale - 0.5`, clamped to the image (replicate
//!   border). For `scale == 2` this averages each 2×2 block.
//! - Source coordinates and weights are tabulated once per axis, then each
//!   destination row blends two cached source rows.
//!
//! Complexity
//! - O(W'·H'·C) per level, where W'×H' is the resampled size.

pub mod scaling;

use crate::error::{ScanError, ScanResult};
use crate::image::{ImageBufU8, ImageU8, ImageView, ImageViewMut};

/// Tolerance applied before flooring `extent / scale`, so exact quotients
/// are not lost to floating-point noise.
const EXTENT_EPS: f64 = 1e-9;

/// Size of one axis after resampling by `scale`.
#[inline]
pub fn resampled_extent(extent: usize, scale: f64) -> usize {
    (extent as f64 / scale + EXTENT_EPS).floor().max(0.0) as usize
}

/// Resample `image` by `scale` for level `scale_index`.
///
/// Fails with `ResampleFailure` if the resampled size degenerates to zero.
pub fn resample_level(
    image: ImageU8<'_>,
    scale: f64,
    scale_index: usize,
) -> ScanResult<ImageBufU8> {
    let width = resampled_extent(image.w, scale);
    let height = resampled_extent(image.h, scale);
    if width == 0 || height == 0 || !scale.is_finite() {
        return Err(ScanError::ResampleFailure {
            scale_index,
            scale,
            width,
            height,
        });
    }
    Ok(resize_bilinear(image, width, height, scale))
}

/// Bilinear resize of `src` to `width × height` with source/destination ratio `scale`.
pub fn resize_bilinear(src: ImageU8<'_>, width: usize, height: usize, scale: f64) -> ImageBufU8 {
    let channels = src.channels;
    let mut dst = ImageBufU8::new(width, height, channels);
    if src.is_empty() || width == 0 || height == 0 {
        return dst;
    }

    let xs = axis_taps(width, src.w, scale);
    let ys = axis_taps(height, src.h, scale);

    let mut upper = vec![0.0f32; width * channels];
    let mut lower = vec![0.0f32; width * channels];
    let mut cached: [Option<usize>; 2] = [None, None];

    for (y, tap) in ys.iter().enumerate() {
        if cached[0] != Some(tap.i0) {
            interpolate_row(src.row(tap.i0), &xs, channels, &mut upper);
            cached[0] = Some(tap.i0);
        }
        if cached[1] != Some(tap.i1) {
            interpolate_row(src.row(tap.i1), &xs, channels, &mut lower);
            cached[1] = Some(tap.i1);
        }
        let wy = tap.frac;
        let dst_row = dst.row_mut(y);
        for ((out, &a), &b) in dst_row.iter_mut().zip(upper.iter()).zip(lower.iter()) {
            let v = a + (b - a) * wy;
            *out = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    dst
}

/// Two neighbouring source indices and the weight of the second one.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Tap {
    i0: usize,
    i1: usize,
    frac: f32,
}

fn axis_taps(dst_len: usize, src_len: usize, scale: f64) -> Vec<Tap> {
    let max = src_len.saturating_sub(1);
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f64 + 0.5) * scale - 0.5).max(0.0);
            let i0 = (pos.floor() as usize).min(max);
            if i0 >= max {
                return Tap {
                    i0: max,
                    i1: max,
                    frac: 0.0,
                };
            }
            Tap {
                i0,
                i1: i0 + 1,
                frac: (pos - i0 as f64) as f32,
            }
        })
        .collect()
}

fn interpolate_row(row: &[u8], xs: &[Tap], channels: usize, out: &mut [f32]) {
    for (x, tap) in xs.iter().enumerate() {
        let a = &row[tap.i0 * channels..(tap.i0 + 1) * channels];
        let b = &row[tap.i1 * channels..(tap.i1 + 1) * channels];
        let dst = &mut out[x * channels..(x + 1) * channels];
        for c in 0..channels {
            let (va, vb) = (a[c] as f32, b[c] as f32);
            dst[c] = va + (vb - va) * tap.frac;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_follow_floor_of_quotient() {
        assert_eq!(resampled_extent(256, 1.0), 256);
        assert_eq!(resampled_extent(256, 2.0), 128);
        assert_eq!(resampled_extent(255, 2.0), 127);
        assert_eq!(resampled_extent(100, 1.5), 66);
        assert_eq!(resampled_extent(3, 4.0), 0);
    }

    #[test]
    fn halving_averages_pixel_pairs() {
        let w = 8;
        let h = 4;
        let data: Vec<u8> = (0..w * h).map(|i| if i % 2 == 0 { 0 } else { 100 }).collect();
        let out = resample_level(ImageU8::gray(w, h, &data), 2.0, 1).expect("resample");
        assert_eq!((out.w, out.h), (4, 2));
        assert!(out.data.iter().all(|&v| v == 50), "got {:?}", out.data);
    }

    #[test]
    fn constant_color_is_preserved() {
        let (w, h) = (30, 20);
        let data: Vec<u8> = (0..w * h).flat_map(|_| [12u8, 130, 250]).collect();
        let out = resample_level(ImageU8::new(w, h, 3, &data), 1.5, 1).expect("resample");
        assert_eq!((out.w, out.h, out.channels), (20, 13, 3));
        for px in out.data.chunks_exact(3) {
            assert_eq!(px, &[12, 130, 250]);
        }
    }

    #[test]
    fn unit_scale_is_identity() {
        let (w, h) = (7, 5);
        let data: Vec<u8> = (0..w * h).map(|i| (i * 7 % 256) as u8).collect();
        let out = resize_bilinear(ImageU8::gray(w, h, &data), w, h, 1.0);
        assert_eq!(out.data, data);
    }

    #[test]
    fn degenerate_level_is_reported() {
        let data = vec![0u8; 6 * 6];
        let err = resample_level(ImageU8::gray(6, 6, &data), 8.0, 3).unwrap_err();
        assert!(matches!(
            err,
            ScanError::ResampleFailure {
                scale_index: 3,
                width: 0,
                height: 0,
                ..
            }
        ));
    }

    #[test]
    fn strided_sub_view_resamples_like_packed_copy() {
        let (w, h) = (12, 10);
        let data: Vec<u8> = (0..w * h).map(|i| ((i * 37) % 256) as u8).collect();
        let view = ImageU8::gray(w, h, &data).sub_view(2, 1, 8, 8);
        let packed = view.to_buffer();
        let a = resize_bilinear(view, 4, 4, 2.0);
        let b = resize_bilinear(packed.as_view(), 4, 4, 2.0);
        assert_eq!(a, b);
    }
}
