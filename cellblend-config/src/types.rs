//! Compositing and sampling configuration types.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_GAMMA_EXPONENT_INVERSE, MIN_GAMMA_EXPONENT_INVERSE};
use crate::error::ConfigError;

// ============================================================================
// Coverage blend policy
// ============================================================================

/// Fragment policy used to turn sampled glyph coverage into a blend weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlendVariant {
    /// Coverage is raised to `1 / gamma_exponent_inverse` before blending.
    /// Mid-coverage texels are pushed toward full coverage so thin strokes
    /// at small pixel sizes read heavier.
    #[default]
    GammaCorrected,
    /// Coverage is used as the blend weight unchanged.
    /// Preferred when the atlas is rasterized at a high enough resolution.
    Raw,
}

impl BlendVariant {
    /// Every variant, in declaration order.
    pub fn all() -> &'static [BlendVariant] {
        &[BlendVariant::GammaCorrected, BlendVariant::Raw]
    }

    /// Whether this variant reshapes coverage before blending.
    pub fn reshapes_coverage(self) -> bool {
        matches!(self, BlendVariant::GammaCorrected)
    }
}

/// The subset of configuration that changes the fragment stage's math.
///
/// Both the CPU reference stage and the WGSL shader composition read this
/// struct, so a pipeline built from it and a CPU evaluation with it agree.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CompositeSettings {
    /// Blend policy (Variant A = `gamma_corrected`, Variant B = `raw`)
    #[serde(default = "crate::defaults::blend_variant")]
    pub variant: BlendVariant,

    /// Inverse of the exponent applied to coverage under `gamma_corrected`.
    /// 1.0 disables reshaping and degenerates to the raw blend.
    #[serde(default = "crate::defaults::gamma_exponent_inverse")]
    pub gamma_exponent_inverse: f32,
}

impl Default for CompositeSettings {
    fn default() -> Self {
        Self {
            variant: crate::defaults::blend_variant(),
            gamma_exponent_inverse: crate::defaults::gamma_exponent_inverse(),
        }
    }
}

impl CompositeSettings {
    /// Variant A with the given exponent inverse.
    pub fn gamma_corrected(gamma_exponent_inverse: f32) -> Self {
        Self {
            variant: BlendVariant::GammaCorrected,
            gamma_exponent_inverse,
        }
    }

    /// Variant B. The exponent is kept at its default but never read.
    pub fn raw() -> Self {
        Self {
            variant: BlendVariant::Raw,
            ..Default::default()
        }
    }

    /// Whether `self` and `other` compose to the same shader.
    ///
    /// The exponent only matters for variants that reshape coverage.
    pub fn same_shader(&self, other: &Self) -> bool {
        self.variant == other.variant
            && (!self.variant.reshapes_coverage()
                || self.gamma_exponent_inverse == other.gamma_exponent_inverse)
    }

    /// Check the exponent against the accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gamma = self.gamma_exponent_inverse;
        if !gamma.is_finite()
            || !(MIN_GAMMA_EXPONENT_INVERSE..=MAX_GAMMA_EXPONENT_INVERSE).contains(&gamma)
        {
            return Err(ConfigError::Validation(format!(
                "gamma_exponent_inverse must be a finite value in [{MIN_GAMMA_EXPONENT_INVERSE}, \
                 {MAX_GAMMA_EXPONENT_INVERSE}], got {gamma}"
            )));
        }

        if !self.variant.reshapes_coverage() && gamma != crate::defaults::gamma_exponent_inverse()
        {
            log::warn!(
                "gamma_exponent_inverse = {} has no effect with the raw blend variant",
                gamma
            );
        }

        Ok(())
    }
}

// ============================================================================
// Output blending
// ============================================================================

/// How the resolved cell color is written into the color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputBlend {
    /// Standard straight-alpha "over" blending against the target
    #[default]
    AlphaOver,
    /// Overwrite the target with the resolved color
    Opaque,
}

impl OutputBlend {
    /// Convert to a wgpu blend state
    #[cfg(feature = "wgpu-types")]
    pub fn to_blend_state(self) -> wgpu::BlendState {
        match self {
            OutputBlend::AlphaOver => wgpu::BlendState::ALPHA_BLENDING,
            OutputBlend::Opaque => wgpu::BlendState::REPLACE,
        }
    }
}

// ============================================================================
// Atlas sampler
// ============================================================================

/// Texture filter used when sampling the glyph atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AtlasFilter {
    /// Nearest-neighbor filtering - hard texel edges
    Nearest,
    /// Bilinear filtering - smooth edges (default)
    #[default]
    Linear,
}

impl AtlasFilter {
    /// Convert to wgpu FilterMode
    #[cfg(feature = "wgpu-types")]
    pub fn to_filter_mode(self) -> wgpu::FilterMode {
        match self {
            AtlasFilter::Nearest => wgpu::FilterMode::Nearest,
            AtlasFilter::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Addressing policy for atlas lookups outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AtlasAddressMode {
    /// Repeat the edge texel (default, needs no device feature)
    #[default]
    ClampToEdge,
    /// Return transparent black outside the atlas.
    /// Requires `ADDRESS_MODE_CLAMP_TO_BORDER` on the device.
    ClampToBorder,
}

impl AtlasAddressMode {
    /// Convert to wgpu AddressMode
    #[cfg(feature = "wgpu-types")]
    pub fn to_address_mode(self) -> wgpu::AddressMode {
        match self {
            AtlasAddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AtlasAddressMode::ClampToBorder => wgpu::AddressMode::ClampToBorder,
        }
    }

    /// Border color to pair with this address mode, if any
    #[cfg(feature = "wgpu-types")]
    pub fn border_color(self) -> Option<wgpu::SamplerBorderColor> {
        match self {
            AtlasAddressMode::ClampToEdge => None,
            AtlasAddressMode::ClampToBorder => Some(wgpu::SamplerBorderColor::TransparentBlack),
        }
    }

    /// Device features this mode needs
    #[cfg(feature = "wgpu-types")]
    pub fn required_features(self) -> wgpu::Features {
        match self {
            AtlasAddressMode::ClampToEdge => wgpu::Features::empty(),
            AtlasAddressMode::ClampToBorder => wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER,
        }
    }
}

/// Sampler policy for the glyph atlas.
///
/// The sampler itself is created and owned by the host; this only
/// describes how it should be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AtlasSamplerSettings {
    #[serde(default = "crate::defaults::atlas_filter")]
    pub filter: AtlasFilter,

    #[serde(default = "crate::defaults::atlas_address_mode")]
    pub address_mode: AtlasAddressMode,
}

impl Default for AtlasSamplerSettings {
    fn default() -> Self {
        Self {
            filter: crate::defaults::atlas_filter(),
            address_mode: crate::defaults::atlas_address_mode(),
        }
    }
}
