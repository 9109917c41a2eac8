use crate::scanner::ScanParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration consumed by the `slide_demo` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: ScanParams,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which extractor, if any, runs on every window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureConfig {
    #[default]
    None,
    RawPixels,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// JSON report with every window; printed to stdout when absent.
    pub json_out: Option<PathBuf>,
    /// PNG with window outlines drawn over the input.
    pub overlay: Option<PathBuf>,
    /// Restrict the overlay to a single scale index.
    pub overlay_scale: Option<usize>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "input": "frame.png" }"#).expect("parse");
        assert_eq!(cfg.input, PathBuf::from("frame.png"));
        assert_eq!(cfg.params, ScanParams::default());
        assert_eq!(cfg.features, FeatureConfig::None);
        assert!(cfg.output.json_out.is_none());
    }

    #[test]
    fn full_config_round_trips_fields() {
        let cfg = parse_config(
            r#"{
                "input": "in.jpg",
                "params": { "win_rows": 64, "win_cols": 32, "scale_ratio": 1.25,
                            "max_num_scales": 6, "stride": 16 },
                "features": "raw_pixels",
                "output": { "json_out": "out/windows.json", "overlay": "out/overlay.png",
                            "overlay_scale": 1 }
            }"#,
        )
        .expect("parse");
        assert_eq!(cfg.params.win_cols, 32);
        assert_eq!(cfg.params.scale_ratio, 1.25);
        assert_eq!(cfg.features, FeatureConfig::RawPixels);
        assert_eq!(cfg.output.overlay_scale, Some(1));
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(parse_config(r#"{ "params": {} }"#).is_err());
    }
}
