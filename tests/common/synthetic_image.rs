/// Generates a simple high-contrast checkerboard image.
#[allow(dead_code)]
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let sum = cx + cy;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Generates an interleaved RGB image with independent horizontal, vertical
/// and diagonal ramps in the three channels.
#[allow(dead_code)]
pub fn gradient_rgb(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            img.push((x * 255 / width) as u8);
            img.push((y * 255 / height) as u8);
            img.push(((x + y) % 256) as u8);
        }
    }
    img
}
