//! Default values for the glyph atlas sampler.

pub fn atlas_filter() -> crate::types::AtlasFilter {
    crate::types::AtlasFilter::Linear
}

pub fn atlas_address_mode() -> crate::types::AtlasAddressMode {
    crate::types::AtlasAddressMode::ClampToEdge
}
