mod common;

use cellblend::{
    AtlasAddressMode, AtlasFilter, BlendVariant, CompositeConfig, ConfigError, OutputBlend,
};
use common::temp_config_path;

#[test]
fn test_config_defaults() {
    let config = CompositeConfig::default();
    assert_eq!(config.composite.variant, BlendVariant::GammaCorrected);
    assert_eq!(config.composite.gamma_exponent_inverse, 1.4);
    assert_eq!(config.atlas_sampler.filter, AtlasFilter::Linear);
    assert_eq!(config.atlas_sampler.address_mode, AtlasAddressMode::ClampToEdge);
    assert_eq!(config.output_blend, OutputBlend::AlphaOver);
    assert_eq!(config.clear_color[3], 1.0);
}

#[test]
fn test_config_builders() {
    let config = CompositeConfig::new()
        .with_variant(BlendVariant::Raw)
        .with_gamma_exponent_inverse(2.2)
        .with_output_blend(OutputBlend::Opaque)
        .with_clear_color([0.0, 0.0, 0.0, 1.0]);
    assert_eq!(config.composite.variant, BlendVariant::Raw);
    assert_eq!(config.composite.gamma_exponent_inverse, 2.2);
    assert_eq!(config.output_blend, OutputBlend::Opaque);
    assert_eq!(config.clear_color_f64(), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_config_empty_yaml_uses_defaults() {
    let config = CompositeConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, CompositeConfig::default());
}

#[test]
fn test_config_yaml_field_names() {
    let yaml = r#"
variant: gamma_corrected
gamma_exponent_inverse: 1.8
atlas_sampler:
  filter: nearest
  address_mode: clamp_to_border
output_blend: opaque
clear_color: [0.1, 0.2, 0.3, 1.0]
"#;
    let config = CompositeConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.composite.variant, BlendVariant::GammaCorrected);
    assert_eq!(config.composite.gamma_exponent_inverse, 1.8);
    assert_eq!(config.atlas_sampler.filter, AtlasFilter::Nearest);
    assert_eq!(
        config.atlas_sampler.address_mode,
        AtlasAddressMode::ClampToBorder
    );
    assert_eq!(config.output_blend, OutputBlend::Opaque);
    assert_eq!(config.clear_color, [0.1, 0.2, 0.3, 1.0]);
}

#[test]
fn test_config_unknown_variant_is_parse_error() {
    let err = CompositeConfig::from_yaml_str("variant: bolder\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_out_of_range_gamma_is_validation_error() {
    for gamma in ["0.05", "10.5", "-1.0", ".nan", ".inf"] {
        let yaml = format!("gamma_exponent_inverse: {gamma}\n");
        let err = CompositeConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "{gamma} should fail validation, got {err:?}"
        );
    }
}

#[test]
fn test_config_save_and_load_round_trip() {
    let (path, _temp_dir) = temp_config_path();
    let config = CompositeConfig::new()
        .with_variant(BlendVariant::Raw)
        .with_output_blend(OutputBlend::Opaque);

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = CompositeConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_saved_yaml_is_flat() {
    let (path, _temp_dir) = temp_config_path();
    CompositeConfig::default().save_to(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("variant: gamma_corrected"));
    assert!(contents.contains("gamma_exponent_inverse:"));
    assert!(!contents.contains("composite:"));
}

#[test]
fn test_config_invalid_file_is_rejected_on_load() {
    let (path, _temp_dir) = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "gamma_exponent_inverse: 0.0\n").unwrap();

    let err = CompositeConfig::load_from(&path).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::Validation(_)));
}

#[test]
fn test_config_yaml_round_trip_through_serde() {
    let config = common::raw_config().with_clear_color([0.5, 0.5, 0.5, 1.0]);
    let yaml = serde_yaml_ng::to_string(&config).unwrap();
    let parsed: CompositeConfig = serde_yaml_ng::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}
