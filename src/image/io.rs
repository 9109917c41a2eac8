//! I/O helpers for scan inputs and debug artifacts.
//!
//! - `load_image`: read a PNG/JPEG into an owned 8-bit RGB buffer.
//! - `save_overlay`: draw window outlines over a copy of an image and write a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageBufU8, ImageU8, ImageView};
use crate::types::WindowRect;
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<ImageBufU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    ImageBufU8::from_raw(width, height, 3, data)
        .ok_or_else(|| format!("Decoded buffer of {} has unexpected size", path.display()))
}

/// Draw 1-px outlines of `rects` over an RGB copy of `image` and save as PNG.
///
/// Gray inputs are replicated into three channels; a fourth (alpha) channel
/// is dropped. Outline pixels falling outside the image are skipped.
pub fn save_overlay(
    path: &Path,
    image: ImageU8<'_>,
    rects: &[WindowRect],
    color: [u8; 3],
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = to_rgb(image)?;
    for rect in rects {
        draw_outline(&mut out, rect, Rgb(color));
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn to_rgb(image: ImageU8<'_>) -> Result<RgbImage, String> {
    if !(1..=4).contains(&image.channels) {
        return Err(format!(
            "Cannot render {}-channel image as RGB",
            image.channels
        ));
    }
    let mut out = RgbImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, px) in row.chunks_exact(image.channels).enumerate() {
            let rgb = if image.channels < 3 {
                [px[0], px[0], px[0]]
            } else {
                [px[0], px[1], px[2]]
            };
            out.put_pixel(x as u32, y as u32, Rgb(rgb));
        }
    }
    Ok(out)
}

fn draw_outline(out: &mut RgbImage, rect: &WindowRect, color: Rgb<u8>) {
    if rect.width <= 0 || rect.height <= 0 {
        return;
    }
    let (w, h) = (out.width() as i64, out.height() as i64);
    let mut plot = |x: i64, y: i64| {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            out.put_pixel(x as u32, y as u32, color);
        }
    };
    let x0 = rect.x as i64;
    let y0 = rect.y as i64;
    let x1 = x0 + rect.width as i64 - 1;
    let y1 = y0 + rect.height as i64 - 1;
    for x in x0..=x1 {
        plot(x, y0);
        plot(x, y1);
    }
    for y in y0..=y1 {
        plot(x0, y);
        plot(x1, y);
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
