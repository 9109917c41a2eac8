//! Parameters of a multiscale window scan.
//!
//! Defaults describe a 90×90 window, two octaves (`scale_ratio = 2`) and a
//! 32-pixel stride, a reasonable starting point for pedestrian-sized targets
//! in VGA frames.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Window height in pixels of the resampled grid.
    pub win_rows: usize,
    /// Window width in pixels of the resampled grid.
    pub win_cols: usize,
    /// Geometric step between consecutive scales (> 1).
    pub scale_ratio: f64,
    /// Upper limit on the number of scales (>= 1).
    pub max_num_scales: usize,
    /// Step between window positions in resampled-grid pixels (> 0).
    pub stride: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            win_rows: 90,
            win_cols: 90,
            scale_ratio: 2.0,
            max_num_scales: 2,
            stride: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScanParams;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: ScanParams =
            serde_json::from_str(r#"{ "win_rows": 48, "stride": 8 }"#).expect("parse");
        assert_eq!(params.win_rows, 48);
        assert_eq!(params.stride, 8);
        assert_eq!(params.win_cols, 90);
        assert_eq!(params.scale_ratio, 2.0);
        assert_eq!(params.max_num_scales, 2);
    }
}
