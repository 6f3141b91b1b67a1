// Library exports for testing and embedding.
//
// The workspace splits into two crates:
//
//   - `cellblend-config`  : YAML configuration, defaults and validation
//   - `cellblend-render`  : vertex/fragment stages, WGSL composition, wgpu
//                           pipeline wiring and offscreen readback
//
// This crate re-exports both so hosts depend on a single package.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cellblend_config as config;
pub use cellblend_render as render;

pub use cellblend_config::{
    AtlasAddressMode, AtlasFilter, AtlasSamplerSettings, BlendVariant, CompositeConfig,
    CompositeSettings, ConfigError, MAX_GAMMA_EXPONENT_INVERSE, MIN_GAMMA_EXPONENT_INVERSE,
    OutputBlend,
};
pub use cellblend_render::{
    AtlasBinding, CellPipeline, CellRenderPass, CellVertex, CoverageAtlas, CoverageSampler,
    FragmentInput, OffscreenTarget, RenderError, UniformCoverage, VertexOutput,
    atlas_sampler_descriptor, fragment_stage, quad_index_count, vertex_stage,
};

/// Load the compositor configuration from the default location, logging and
/// falling back to defaults if it cannot be read or is invalid.
pub fn load_config_or_default() -> CompositeConfig {
    match CompositeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load compositor config, using defaults: {:#}", e);
            CompositeConfig::default()
        }
    }
}
