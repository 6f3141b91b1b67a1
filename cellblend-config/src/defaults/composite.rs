//! Default values for the coverage compositing policy.

pub fn blend_variant() -> crate::types::BlendVariant {
    crate::types::BlendVariant::GammaCorrected
}

/// Inverse of the exponent applied to sampled coverage (Variant A only).
pub fn gamma_exponent_inverse() -> f32 {
    1.4 // Boosts mid-coverage texels so thin strokes stay visible
}

pub fn output_blend() -> crate::types::OutputBlend {
    crate::types::OutputBlend::AlphaOver
}

pub fn clear_color() -> [f32; 4] {
    [0.157, 0.165, 0.212, 1.0] // #282a36
}
