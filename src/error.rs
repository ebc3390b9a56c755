//! Error types for the SVG rasterization library.
//!
//! This module defines all error types that can occur while parsing scenes
//! and rendering them to raster buffers.

/// Result type alias for SVG library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during SVG parsing and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while reading an SVG source from disk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file suffix is not one of the supported SVG suffixes
    #[error("Unsupported file suffix: expected .svg or .svgz, found '{0}'")]
    UnsupportedSuffix(String),

    /// SVG input is not valid UTF-8
    #[error("SVG data is not valid UTF-8")]
    NotUtf8,

    /// The scene engine rejected the input
    #[error("Failed to parse SVG: {0}")]
    Parse(String),

    /// The scene has a zero-area intrinsic or resolved size
    #[error("Scene resolves to an empty raster ({width}x{height})")]
    EmptyScene {
        /// Resolved output width in pixels
        width: u32,
        /// Resolved output height in pixels
        height: u32,
    },

    /// Aspect ratio is undefined because an intrinsic dimension is zero
    #[error("Aspect ratio is undefined for intrinsic size {width}x{height}")]
    DegenerateAspectRatio {
        /// Intrinsic width
        width: f64,
        /// Intrinsic height
        height: f64,
    },

    /// A fit target or zoom factor outside the valid range
    #[error("Invalid fit value: {value} ({reason})")]
    InvalidFitValue {
        /// The offending value
        value: f32,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// Encoding a raster buffer to an image format failed
    #[error("Image encoding error: {0}")]
    Encode(String),

    /// A render was requested on a tree with no loaded scene
    #[error("No scene loaded: parse an SVG before rendering")]
    NotLoaded,

    /// Raster buffer dimensions are invalid or exceed what can be allocated
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_suffix_error() {
        let err = Error::UnsupportedSuffix("png".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains(".svg"));
        assert!(msg.contains("png"));
    }

    #[test]
    fn test_invalid_fit_value_error() {
        let err = Error::InvalidFitValue {
            value: -2.0,
            reason: "zoom factor must be positive",
        };
        let msg = format!("{}", err);
        assert!(msg.contains("-2"));
        assert!(msg.contains("positive"));
    }

    #[test]
    fn test_degenerate_aspect_ratio_error() {
        let err = Error::DegenerateAspectRatio {
            width: 100.0,
            height: 0.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("100"));
        assert!(msg.contains("undefined"));
    }

    #[test]
    fn test_not_loaded_error() {
        let msg = format!("{}", Error::NotLoaded);
        assert!(msg.contains("No scene loaded"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
