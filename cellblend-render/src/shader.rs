//! WGSL composition and pre-validation for the cell compositing shader.
//!
//! Both blend variants come from one template (`shaders/cell_composite.wgsl`).
//! The variant and the coverage exponent are emitted as WGSL `const`
//! declarations ahead of the shared body, so switching policy means
//! composing a new source and rebuilding the pipeline, never editing a
//! second copy of the shader.

use cellblend_config::CompositeSettings;

use crate::error::RenderError;

/// Shared shader body; expects the constants from [`compose_cell_shader`].
const CELL_SHADER_BODY: &str = include_str!("shaders/cell_composite.wgsl");

/// Vertex entry point name.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Fragment entry point name.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Bind group index holding the atlas texture and sampler.
pub const ATLAS_BIND_GROUP: u32 = 0;

/// Binding of the glyph atlas texture within [`ATLAS_BIND_GROUP`].
pub const ATLAS_TEXTURE_BINDING: u32 = 0;

/// Binding of the atlas sampler within [`ATLAS_BIND_GROUP`].
pub const ATLAS_SAMPLER_BINDING: u32 = 1;

/// Compose the full WGSL source for `settings`.
pub fn compose_cell_shader(settings: &CompositeSettings) -> String {
    // `{:?}` keeps a decimal point on whole numbers ("1.0"), which WGSL
    // needs to infer a float literal.
    format!(
        "const RESHAPE_COVERAGE: bool = {};\nconst GAMMA_EXPONENT_INVERSE: f32 = {:?};\n\n{}",
        settings.variant.reshapes_coverage(),
        settings.gamma_exponent_inverse,
        CELL_SHADER_BODY
    )
}

/// Parse and validate WGSL with naga, returning the module on success.
pub fn validate_wgsl(name: &str, source: &str) -> Result<naga::Module, RenderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| RenderError::WgslParse {
        name: name.to_string(),
        details: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderValidation {
        name: name.to_string(),
        details: e.to_string(),
    })?;

    Ok(module)
}

/// Compose and validate in one step.
pub fn build_cell_shader(settings: &CompositeSettings) -> Result<String, RenderError> {
    let source = compose_cell_shader(settings);
    validate_wgsl("cell composite shader", &source)?;
    log::debug!("Composed cell shader WGSL:\n{}", source);
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellblend_config::BlendVariant;

    #[test]
    fn test_compose_emits_constants() {
        let src = compose_cell_shader(&CompositeSettings::gamma_corrected(1.4));
        assert!(src.starts_with("const RESHAPE_COVERAGE: bool = true;"));
        assert!(src.contains("const GAMMA_EXPONENT_INVERSE: f32 = 1.4;"));

        let src = compose_cell_shader(&CompositeSettings::raw());
        assert!(src.starts_with("const RESHAPE_COVERAGE: bool = false;"));
    }

    #[test]
    fn test_whole_number_exponent_is_a_float_literal() {
        let src = compose_cell_shader(&CompositeSettings::gamma_corrected(2.0));
        assert!(src.contains("const GAMMA_EXPONENT_INVERSE: f32 = 2.0;"));
    }

    #[test]
    fn test_both_variants_validate() {
        for variant in BlendVariant::all() {
            let settings = CompositeSettings {
                variant: *variant,
                ..Default::default()
            };
            build_cell_shader(&settings).unwrap();
        }
    }

    #[test]
    fn test_broken_source_reports_parse_error() {
        let err = validate_wgsl("broken", "fn main( {").unwrap_err();
        assert!(matches!(err, RenderError::WgslParse { .. }));
    }
}
