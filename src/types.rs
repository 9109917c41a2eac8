use crate::diagnostics::ScaleLevelReport;
use serde::{Deserialize, Serialize};

/// Opaque descriptor produced by a feature extractor for one window.
pub type FeatureVector = Vec<f64>;

/// Axis-aligned window in original-image pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// One candidate window: its rectangle, the scale it came from and the
/// descriptor computed on its resampled pixels (when an extractor ran).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub rect: WindowRect,
    pub scale_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
}

/// Everything produced by one multiscale scan, in scale/row/column order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSet {
    /// Resize factor per scale index (`scales[0] == 1.0`).
    pub scales: Vec<f64>,
    pub windows: Vec<Window>,
    pub levels: Vec<ScaleLevelReport>,
    /// Capacity reserved up front from the planner's upper bound.
    pub capacity_hint: usize,
    pub elapsed_ms: f64,
}

impl WindowSet {
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn num_scales(&self) -> usize {
        self.scales.len()
    }

    /// Rectangles of every window, in output order.
    pub fn rects(&self) -> Vec<WindowRect> {
        self.windows.iter().map(|w| w.rect).collect()
    }

    /// Feature vectors in lock-step with `rects()`; empty when no extractor ran.
    pub fn features(&self) -> Vec<&FeatureVector> {
        self.windows.iter().filter_map(|w| w.features.as_ref()).collect()
    }

    /// Resize factor used for the window at `index`.
    pub fn scale_of(&self, index: usize) -> Option<f64> {
        let window = self.windows.get(index)?;
        self.scales.get(window.scale_index).copied()
    }

    pub fn windows_at_scale(&self, scale_index: usize) -> impl Iterator<Item = &Window> + '_ {
        self.windows
            .iter()
            .filter(move |w| w.scale_index == scale_index)
    }

    /// Split into the parallel rectangle and feature sequences.
    pub fn into_parts(self) -> (Vec<WindowRect>, Vec<FeatureVector>) {
        let mut rects = Vec::with_capacity(self.windows.len());
        let mut feats = Vec::new();
        for window in self.windows {
            rects.push(window.rect);
            if let Some(f) = window.features {
                feats.push(f);
            }
        }
        (rects, feats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(x: i32, scale_index: usize, features: Option<Vec<f64>>) -> Window {
        Window {
            rect: WindowRect {
                x,
                y: 0,
                width: 4,
                height: 4,
            },
            scale_index,
            features,
        }
    }

    #[test]
    fn parts_stay_aligned() {
        let set = WindowSet {
            scales: vec![1.0, 2.0],
            windows: vec![
                window(0, 0, Some(vec![0.1])),
                window(2, 0, Some(vec![0.2])),
                window(0, 1, Some(vec![0.3])),
            ],
            ..Default::default()
        };
        assert_eq!(set.scale_of(2), Some(2.0));
        assert_eq!(set.scale_of(3), None);
        assert_eq!(set.windows_at_scale(0).count(), 2);
        let (rects, feats) = set.into_parts();
        assert_eq!(rects.len(), feats.len());
        assert_eq!(feats[1], vec![0.2]);
        assert_eq!(rects[1].right(), 6);
    }

    #[test]
    fn window_serializes_without_missing_features() {
        let json = serde_json::to_string(&window(3, 1, None)).expect("serialize");
        assert_eq!(
            json,
            r#"{"rect":{"x":3,"y":0,"width":4,"height":4},"scaleIndex":1}"#
        );
    }
}
