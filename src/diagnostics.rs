use serde::{Deserialize, Serialize};

/// What one scale of the scan produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLevelReport {
    pub scale_index: usize,
    pub scale: f64,
    /// Resampled grid size the window slid over.
    pub width: usize,
    pub height: usize,
    pub windows: usize,
    pub elapsed_ms: f64,
}

impl ScaleLevelReport {
    /// One-line summary used by the demo tooling and debug logs.
    pub fn summary(&self) -> String {
        format!(
            "scale {} (x{:.3}): {}x{} grid, {} windows, {:.3} ms",
            self.scale_index, self.scale, self.width, self.height, self.windows, self.elapsed_ms
        )
    }
}
