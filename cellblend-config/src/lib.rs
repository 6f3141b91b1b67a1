//! Configuration system for the cellblend glyph compositing pipeline.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for the cell compositor. It includes:
//!
//! - Blend policy selection (gamma-corrected vs raw coverage)
//! - The coverage reshaping exponent
//! - Atlas sampler filtering and addressing policy
//! - Output blend state and clear color for the host render pass

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{CompositeConfig, MAX_GAMMA_EXPONENT_INVERSE, MIN_GAMMA_EXPONENT_INVERSE};
pub use error::ConfigError;
pub use types::{
    AtlasAddressMode, AtlasFilter, AtlasSamplerSettings, BlendVariant, CompositeSettings,
    OutputBlend,
};
