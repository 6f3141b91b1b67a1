//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on config fields.
//! Everything is re-exported from this module.

mod composite;
mod sampler;

// ── Coverage compositing ───────────────────────────────────────────────────
pub use composite::{blend_variant, clear_color, gamma_exponent_inverse, output_blend};

// ── Atlas sampling ─────────────────────────────────────────────────────────
pub use sampler::{atlas_address_mode, atlas_filter};
