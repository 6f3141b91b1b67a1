//! Fragment stage: glyph coverage compositing.
//!
//! CPU reference for `fs_main` in [`crate::shader`]. Every function here is
//! pure and mirrors one step of the WGSL body, so the two can be checked
//! against each other pixel for pixel.
//!
//! Policy:
//! - `tex_coords` with both components `<= 0` means "no glyph". The
//!   background is returned as is and the atlas is not sampled.
//! - Otherwise coverage is sampled, reshaped per [`BlendVariant`], and used
//!   to mix background toward foreground on all four channels.

use cellblend_config::{BlendVariant, CompositeSettings};

use crate::coverage::CoverageSampler;
use crate::vertex::FragmentInput;

/// Whether `tex_coords` address a glyph, as opposed to the `(0, 0)` sentinel.
///
/// NaN components compare false and therefore read as "no glyph".
#[inline]
pub fn has_glyph(tex_coords: [f32; 2]) -> bool {
    tex_coords[0] > 0.0 || tex_coords[1] > 0.0
}

/// Raise coverage to `1 / gamma_exponent_inverse`.
///
/// For exponent inverses above 1 this lifts every value strictly inside
/// (0, 1); 0 and 1 are fixed points.
#[inline]
pub fn reshape_coverage(raw_alpha: f32, gamma_exponent_inverse: f32) -> f32 {
    raw_alpha.powf(1.0 / gamma_exponent_inverse)
}

/// Blend weight for a sampled coverage value under `settings`.
#[inline]
pub fn resolve_coverage(settings: &CompositeSettings, raw_alpha: f32) -> f32 {
    match settings.variant {
        BlendVariant::GammaCorrected => {
            reshape_coverage(raw_alpha, settings.gamma_exponent_inverse)
        }
        BlendVariant::Raw => raw_alpha,
    }
}

/// Per-channel `bg * (1 - alpha) + fg * alpha`, the same formula as WGSL `mix`.
#[inline]
pub fn mix_color(bg: [f32; 4], fg: [f32; 4], alpha: f32) -> [f32; 4] {
    let mut out = [0.0; 4];
    for ((o, b), f) in out.iter_mut().zip(bg).zip(fg) {
        *o = b * (1.0 - alpha) + f * alpha;
    }
    out
}

/// Resolve the color of one fragment.
pub fn fragment_stage<S>(
    input: &FragmentInput,
    atlas: &S,
    settings: &CompositeSettings,
) -> [f32; 4]
where
    S: CoverageSampler + ?Sized,
{
    if !has_glyph(input.tex_coords) {
        return input.bg_color;
    }
    let raw_alpha = atlas.sample_alpha(input.tex_coords);
    let alpha = resolve_coverage(settings, raw_alpha);
    mix_color(input.bg_color, input.fg_color, alpha)
}
