//! Mapping from a resampled scale level back to original-image coordinates.

use crate::types::WindowRect;

/// Coordinate mapping from a resampled level to the original image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelScaling {
    /// Original pixels per resampled pixel (`ratio^s`).
    pub scale: f64,
}

impl LevelScaling {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Lift a resampled-grid point `[x, y]` into the original image.
    #[inline]
    pub fn up(&self, p_level: [f64; 2]) -> [f64; 2] {
        [p_level[0] * self.scale, p_level[1] * self.scale]
    }

    /// Rectangle in original coordinates of the `win_cols × win_rows` window
    /// whose top-left corner is at (`row`, `col`) of the resampled grid.
    ///
    /// Position and size are rounded to the nearest pixel independently.
    pub fn window_rect(
        &self,
        row: usize,
        col: usize,
        win_rows: usize,
        win_cols: usize,
    ) -> WindowRect {
        let [x, y] = self.up([col as f64, row as f64]);
        let [w, h] = self.up([win_cols as f64, win_rows as f64]);
        WindowRect {
            x: x.round() as i32,
            y: y.round() as i32,
            width: w.round() as i32,
            height: h.round() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_is_exact() {
        let rect = LevelScaling::new(1.0).window_rect(96, 32, 64, 48);
        assert_eq!(
            rect,
            WindowRect {
                x: 32,
                y: 96,
                width: 48,
                height: 64
            }
        );
    }

    #[test]
    fn fractional_scale_rounds_not_truncates() {
        let rect = LevelScaling::new(1.5).window_rect(3, 5, 7, 9);
        // 5*1.5 = 7.5, 3*1.5 = 4.5, 9*1.5 = 13.5, 7*1.5 = 10.5
        assert_eq!(
            rect,
            WindowRect {
                x: 8,
                y: 5,
                width: 14,
                height: 11
            }
        );
    }
}
