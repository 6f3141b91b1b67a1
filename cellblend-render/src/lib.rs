//! GPU compositing pipeline for terminal character cells.
//!
//! This crate provides the per-cell compositing core and the host-side
//! wiring around it:
//!
//! - Cell vertex layout and the vertex stage (NDC placement, pass-through interpolants)
//! - The fragment stage: glyph coverage blended over the cell background,
//!   either gamma-reshaped or raw, as WGSL and as a CPU reference
//! - WGSL composition from one template plus naga pre-validation
//! - Pipeline, bind group and render-pass context construction
//! - Headless offscreen rendering with readback for visual testing
//!
//! Atlas construction, glyph selection and vertex buffer generation belong to
//! the caller. The atlas must expose a readable alpha channel.

pub mod composite;
pub mod coverage;
pub mod error;
pub mod offscreen;
pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod vertex;

// Re-export main public types
pub use composite::{fragment_stage, has_glyph, mix_color, reshape_coverage, resolve_coverage};
pub use coverage::{CoverageAtlas, CoverageSampler, UniformCoverage};
pub use error::RenderError;
pub use offscreen::OffscreenTarget;
pub use pass::{CellRenderPass, quad_index_count};
pub use pipeline::{AtlasBinding, CellPipeline, atlas_sampler_descriptor};
pub use vertex::{CellVertex, FragmentInput, VertexOutput, vertex_stage};

// Re-export shared types from dependencies for convenience
pub use cellblend_config::{BlendVariant, CompositeConfig, CompositeSettings};
