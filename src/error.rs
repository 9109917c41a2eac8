//! Error types surfaced by the scale planner and the window enumerator.

/// Boxed error returned by feature extractors.
pub type ExtractError = Box<dyn std::error::Error + Send + Sync>;

pub type ScanResult<T> = Result<T, ScanError>;

/// Reasons a scan configuration is rejected before any output is allocated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    EmptyImage {
        width: usize,
        height: usize,
    },
    MalformedImage {
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        len: usize,
    },
    ZeroWindow {
        win_rows: usize,
        win_cols: usize,
    },
    WindowExceedsImage {
        win_rows: usize,
        win_cols: usize,
        image_rows: usize,
        image_cols: usize,
    },
    ZeroStride,
    ScaleRatioTooSmall {
        scale_ratio: f64,
    },
    ZeroScales,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyImage { width, height } => {
                write!(f, "image is empty ({width}x{height})")
            }
            ConfigError::MalformedImage {
                width,
                height,
                channels,
                stride,
                len,
            } => write!(
                f,
                "image buffer of {len} samples cannot hold {width}x{height}x{channels} with stride {stride}"
            ),
            ConfigError::ZeroWindow { win_rows, win_cols } => {
                write!(f, "window must be non-empty (got {win_rows}x{win_cols})")
            }
            ConfigError::WindowExceedsImage {
                win_rows,
                win_cols,
                image_rows,
                image_cols,
            } => write!(
                f,
                "window {win_rows}x{win_cols} (rows x cols) exceeds image {image_rows}x{image_cols}"
            ),
            ConfigError::ZeroStride => write!(f, "stride must be positive"),
            ConfigError::ScaleRatioTooSmall { scale_ratio } => {
                write!(f, "scale ratio must be a finite value > 1 (got {scale_ratio})")
            }
            ConfigError::ZeroScales => write!(f, "at least one scale is required"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failures of a multiscale window scan. No partial results accompany them.
#[derive(Debug)]
pub enum ScanError {
    InvalidConfiguration(ConfigError),
    /// Resampling for `scale_index` would produce an image with no pixels.
    ResampleFailure {
        scale_index: usize,
        scale: f64,
        width: usize,
        height: usize,
    },
    /// The feature extractor failed on the window whose top-left corner sits at
    /// (`row`, `col`) of the resampled grid.
    Extraction {
        scale_index: usize,
        row: usize,
        col: usize,
        source: ExtractError,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::InvalidConfiguration(err) => write!(f, "invalid configuration: {err}"),
            ScanError::ResampleFailure {
                scale_index,
                scale,
                width,
                height,
            } => write!(
                f,
                "resampling scale {scale_index} (factor {scale:.4}) yields a degenerate {width}x{height} image"
            ),
            ScanError::Extraction {
                scale_index,
                row,
                col,
                source,
            } => write!(
                f,
                "feature extraction failed at scale {scale_index}, window ({row}, {col}): {source}"
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::InvalidConfiguration(err) => Some(err),
            ScanError::Extraction { source, .. } => Some(source.as_ref()),
            ScanError::ResampleFailure { .. } => None,
        }
    }
}

impl From<ConfigError> for ScanError {
    fn from(err: ConfigError) -> Self {
        ScanError::InvalidConfiguration(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn extraction_error_chains_source() {
        let err = ScanError::Extraction {
            scale_index: 1,
            row: 4,
            col: 8,
            source: "bad window".into(),
        };
        assert_eq!(
            err.to_string(),
            "feature extraction failed at scale 1, window (4, 8): bad window"
        );
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("bad window"));
    }

    #[test]
    fn config_error_converts() {
        let err: ScanError = ConfigError::ZeroStride.into();
        assert!(matches!(
            err,
            ScanError::InvalidConfiguration(ConfigError::ZeroStride)
        ));
        assert_eq!(err.to_string(), "invalid configuration: stride must be positive");
    }
}
