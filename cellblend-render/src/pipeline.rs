//! GPU pipeline creation for the cell compositor.
//!
//! The atlas texture and sampler are owned by the caller. They are passed in
//! explicitly when the bind group is built and never stored here beyond the
//! bind group that references them.

use cellblend_config::{AtlasSamplerSettings, CompositeConfig, CompositeSettings, OutputBlend};
use wgpu::*;

use crate::error::RenderError;
use crate::shader::{
    ATLAS_SAMPLER_BINDING, ATLAS_TEXTURE_BINDING, FRAGMENT_ENTRY, VERTEX_ENTRY,
    build_cell_shader,
};
use crate::vertex::CellVertex;

/// Create the atlas bind group layout: texture at binding 0, sampler at binding 1.
pub fn create_atlas_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("cell atlas bind group layout"),
        entries: &[
            BindGroupLayoutEntry {
                binding: ATLAS_TEXTURE_BINDING,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: ATLAS_SAMPLER_BINDING,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Recommended sampler configuration for the glyph atlas.
///
/// `ClampToBorder` needs `Features::ADDRESS_MODE_CLAMP_TO_BORDER` on the
/// device; see [`cellblend_config::AtlasAddressMode::required_features`].
pub fn atlas_sampler_descriptor(settings: &AtlasSamplerSettings) -> SamplerDescriptor<'static> {
    let address_mode = settings.address_mode.to_address_mode();
    let filter = settings.filter.to_filter_mode();
    SamplerDescriptor {
        label: Some("cell atlas sampler"),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: FilterMode::Nearest,
        border_color: settings.address_mode.border_color(),
        ..Default::default()
    }
}

/// Bind group over an externally owned atlas view and sampler.
pub struct AtlasBinding {
    bind_group: BindGroup,
}

impl AtlasBinding {
    /// Bind `atlas_view` and `atlas_sampler` at the fixed slot pair.
    ///
    /// The view must be a 2D float texture with a readable alpha channel.
    pub fn new(
        device: &Device,
        layout: &BindGroupLayout,
        atlas_view: &TextureView,
        atlas_sampler: &Sampler,
    ) -> Self {
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("cell atlas bind group"),
            layout,
            entries: &[
                BindGroupEntry {
                    binding: ATLAS_TEXTURE_BINDING,
                    resource: BindingResource::TextureView(atlas_view),
                },
                BindGroupEntry {
                    binding: ATLAS_SAMPLER_BINDING,
                    resource: BindingResource::Sampler(atlas_sampler),
                },
            ],
        });
        Self { bind_group }
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }
}

/// Render pipeline for cell quads plus the layout its bind groups must use.
pub struct CellPipeline {
    pipeline: RenderPipeline,
    atlas_layout: BindGroupLayout,
    target_format: TextureFormat,
    settings: CompositeSettings,
    output_blend: OutputBlend,
}

impl CellPipeline {
    /// Build the pipeline for `target_format` under `config`.
    ///
    /// Only the fields that reach the shader or blend state are validated.
    pub fn new(
        device: &Device,
        target_format: TextureFormat,
        config: &CompositeConfig,
    ) -> Result<Self, RenderError> {
        config.composite.validate()?;

        let atlas_layout = create_atlas_bind_group_layout(device);
        let pipeline = create_cell_pipeline(
            device,
            target_format,
            &atlas_layout,
            &config.composite,
            config.output_blend,
        )?;

        log::info!(
            "Cell pipeline created: format={:?} variant={:?} gamma_exponent_inverse={} blend={:?}",
            target_format,
            config.composite.variant,
            config.composite.gamma_exponent_inverse,
            config.output_blend
        );

        Ok(Self {
            pipeline,
            atlas_layout,
            target_format,
            settings: config.composite,
            output_blend: config.output_blend,
        })
    }

    /// Rebuild the pipeline if `config` changes the shader or blend state.
    ///
    /// The bind group layout is kept, so existing [`AtlasBinding`]s stay
    /// valid. Returns whether a rebuild happened.
    pub fn reconfigure(
        &mut self,
        device: &Device,
        config: &CompositeConfig,
    ) -> Result<bool, RenderError> {
        config.composite.validate()?;

        if config.composite.same_shader(&self.settings) && config.output_blend == self.output_blend
        {
            self.settings = config.composite;
            return Ok(false);
        }

        self.pipeline = create_cell_pipeline(
            device,
            self.target_format,
            &self.atlas_layout,
            &config.composite,
            config.output_blend,
        )?;
        self.settings = config.composite;
        self.output_blend = config.output_blend;

        log::info!(
            "Cell pipeline rebuilt: variant={:?} gamma_exponent_inverse={} blend={:?}",
            self.settings.variant,
            self.settings.gamma_exponent_inverse,
            self.output_blend
        );
        Ok(true)
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    /// Layout that [`AtlasBinding::new`] must be given.
    pub fn atlas_layout(&self) -> &BindGroupLayout {
        &self.atlas_layout
    }

    pub fn target_format(&self) -> TextureFormat {
        self.target_format
    }

    pub fn settings(&self) -> &CompositeSettings {
        &self.settings
    }

    pub fn output_blend(&self) -> OutputBlend {
        self.output_blend
    }
}

/// Compose, validate and compile the cell shader, then build the pipeline.
fn create_cell_pipeline(
    device: &Device,
    target_format: TextureFormat,
    atlas_layout: &BindGroupLayout,
    settings: &CompositeSettings,
    output_blend: OutputBlend,
) -> Result<RenderPipeline, RenderError> {
    let source = build_cell_shader(settings)?;

    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("cell composite shader"),
        source: ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("cell pipeline layout"),
        bind_group_layouts: &[atlas_layout],
        push_constant_ranges: &[],
    });

    Ok(device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("cell pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[CellVertex::desc()],
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(ColorTargetState {
                format: target_format,
                blend: Some(output_blend.to_blend_state()),
                write_mask: ColorWrites::ALL,
            })],
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellblend_config::{AtlasAddressMode, AtlasFilter};

    #[test]
    fn test_default_sampler_clamps_to_edge_with_linear_filter() {
        let desc = atlas_sampler_descriptor(&AtlasSamplerSettings::default());
        assert_eq!(desc.address_mode_u, AddressMode::ClampToEdge);
        assert_eq!(desc.address_mode_v, AddressMode::ClampToEdge);
        assert_eq!(desc.mag_filter, FilterMode::Linear);
        assert_eq!(desc.min_filter, FilterMode::Linear);
        assert_eq!(desc.border_color, None);
    }

    #[test]
    fn test_border_sampler_uses_transparent_border() {
        let desc = atlas_sampler_descriptor(&AtlasSamplerSettings {
            filter: AtlasFilter::Nearest,
            address_mode: AtlasAddressMode::ClampToBorder,
        });
        assert_eq!(desc.address_mode_u, AddressMode::ClampToBorder);
        assert_eq!(desc.mag_filter, FilterMode::Nearest);
        assert_eq!(
            desc.border_color,
            Some(SamplerBorderColor::TransparentBlack)
        );
        assert_eq!(
            AtlasAddressMode::ClampToBorder.required_features(),
            Features::ADDRESS_MODE_CLAMP_TO_BORDER
        );
        assert!(AtlasAddressMode::ClampToEdge.required_features().is_empty());
    }
}
