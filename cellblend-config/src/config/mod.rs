//! Compositor configuration.
//!
//! # Sub-modules
//!
//! - [`persistence`]: `impl CompositeConfig` methods for load/save and path resolution
//!
//! The shader-affecting fields are grouped in [`CompositeSettings`] and
//! flattened with `#[serde(flatten)]`, so `variant` and
//! `gamma_exponent_inverse` sit at the top level of the YAML file.

pub mod persistence;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{AtlasSamplerSettings, BlendVariant, CompositeSettings, OutputBlend};

/// Smallest accepted `gamma_exponent_inverse`.
pub const MIN_GAMMA_EXPONENT_INVERSE: f32 = 0.1;

/// Largest accepted `gamma_exponent_inverse`.
pub const MAX_GAMMA_EXPONENT_INVERSE: f32 = 10.0;

/// Configuration recognized by the cell compositor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompositeConfig {
    /// Fragment blend policy and coverage exponent
    #[serde(flatten)]
    pub composite: CompositeSettings,

    /// Sampler policy the host should apply to the atlas sampler
    #[serde(default)]
    pub atlas_sampler: AtlasSamplerSettings,

    /// Blend state of the color target
    #[serde(default = "crate::defaults::output_blend")]
    pub output_blend: OutputBlend,

    /// Color the host clears the frame to before drawing cells (RGBA, 0.0-1.0)
    #[serde(default = "crate::defaults::clear_color")]
    pub clear_color: [f32; 4],
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            composite: CompositeSettings::default(),
            atlas_sampler: AtlasSamplerSettings::default(),
            output_blend: crate::defaults::output_blend(),
            clear_color: crate::defaults::clear_color(),
        }
    }
}

impl CompositeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: BlendVariant) -> Self {
        self.composite.variant = variant;
        self
    }

    pub fn with_gamma_exponent_inverse(mut self, gamma_exponent_inverse: f32) -> Self {
        self.composite.gamma_exponent_inverse = gamma_exponent_inverse;
        self
    }

    pub fn with_output_blend(mut self, output_blend: OutputBlend) -> Self {
        self.output_blend = output_blend;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: CompositeConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.composite.validate()?;

        if let Some(c) = self
            .clear_color
            .iter()
            .find(|c| !c.is_finite() || !(0.0..=1.0).contains(*c))
        {
            return Err(ConfigError::Validation(format!(
                "clear_color components must be in [0.0, 1.0], got {c}"
            )));
        }

        Ok(())
    }

    /// Clear color as the f64 tuple wgpu expects in `LoadOp::Clear`.
    pub fn clear_color_f64(&self) -> [f64; 4] {
        self.clear_color.map(f64::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompositeConfig::default();
        assert_eq!(config.composite.variant, BlendVariant::GammaCorrected);
        assert_eq!(config.composite.gamma_exponent_inverse, 1.4);
        assert_eq!(config.output_blend, OutputBlend::AlphaOver);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = CompositeConfig::from_yaml_str("variant: raw\n").unwrap();
        assert_eq!(config.composite.variant, BlendVariant::Raw);
        assert_eq!(config.composite.gamma_exponent_inverse, 1.4);
        assert_eq!(config.atlas_sampler, AtlasSamplerSettings::default());
    }

    #[test]
    fn test_rejects_non_positive_gamma() {
        let config = CompositeConfig::new().with_gamma_exponent_inverse(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = CompositeConfig::new().with_gamma_exponent_inverse(f32::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_out_of_range_clear_color() {
        let config = CompositeConfig::new().with_clear_color([0.0, 0.0, 2.0, 1.0]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("clear_color"));
    }

    #[test]
    fn test_gamma_of_one_is_accepted() {
        let config = CompositeConfig::new().with_gamma_exponent_inverse(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_composite_settings_ignore_clear_color() {
        let config = CompositeConfig::new().with_clear_color([0.0, 0.0, 2.0, 1.0]);
        assert!(config.composite.validate().is_ok());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_shader_ignores_gamma_under_raw() {
        let raw = CompositeSettings::raw();
        let raw_other_gamma = CompositeSettings {
            gamma_exponent_inverse: 2.2,
            ..raw
        };
        assert!(raw.same_shader(&raw_other_gamma));

        let a = CompositeSettings::gamma_corrected(1.4);
        assert!(a.same_shader(&CompositeSettings::gamma_corrected(1.4)));
        assert!(!a.same_shader(&CompositeSettings::gamma_corrected(2.2)));
        assert!(!a.same_shader(&raw));
    }
}
