//! Typed error types for cellblend-render.
//!
//! Callers at the crate boundary can match on specific error variants instead
//! of relying on opaque `anyhow` strings.

use thiserror::Error;

/// Top-level error type for the compositing pipeline.
///
/// Covers the failure categories callers may want to distinguish:
/// - Shader composition and validation
/// - CPU atlas construction
/// - Offscreen target creation and readback
/// - Configuration rejected before any GPU object is built
#[derive(Debug, Error)]
pub enum RenderError {
    // -----------------------------------------------------------------------
    // Shader errors
    // -----------------------------------------------------------------------
    /// The composed WGSL source could not be parsed.
    #[error("WGSL parse error for '{name}': {details}")]
    WgslParse {
        /// Shader label.
        name: String,
        /// Human-readable parse error details.
        details: String,
    },

    /// The composed shader module failed naga validation.
    #[error("Shader validation failed for '{name}': {details}")]
    ShaderValidation {
        /// Shader label.
        name: String,
        /// Human-readable validation error details.
        details: String,
    },

    // -----------------------------------------------------------------------
    // Atlas
    // -----------------------------------------------------------------------
    /// The coverage byte slice does not match the stated atlas dimensions.
    #[error("Invalid atlas data size: expected {expected} bytes, got {actual} bytes")]
    AtlasSize {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },

    // -----------------------------------------------------------------------
    // Offscreen rendering
    // -----------------------------------------------------------------------
    /// The requested offscreen target is empty or exceeds device limits.
    #[error("Invalid offscreen target size {width}x{height} (device limit {limit})")]
    InvalidTargetSize {
        width: u32,
        height: u32,
        limit: u32,
    },

    /// Readback only supports 8-bit RGBA/BGRA targets.
    #[error("Unsupported offscreen target format {0:?}")]
    UnsupportedTargetFormat(wgpu::TextureFormat),

    /// The pipeline was built for a different color target format.
    #[error("Pipeline targets {pipeline:?} but the offscreen target is {target:?}")]
    TargetFormatMismatch {
        pipeline: wgpu::TextureFormat,
        target: wgpu::TextureFormat,
    },

    /// The offscreen texture could not be copied back to CPU memory.
    #[error("Offscreen readback failed: {0}")]
    Readback(String),

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------
    /// The compositor configuration was rejected.
    #[error(transparent)]
    Config(#[from] cellblend_config::ConfigError),
}
