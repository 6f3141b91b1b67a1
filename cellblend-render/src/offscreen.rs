//! Headless offscreen rendering with CPU readback.
//!
//! Draws cells into a private texture and copies the result back as an
//! `image::RgbaImage`. Used for visual regression checks of the blend
//! policy where no window or surface exists.

use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::pass::CellRenderPass;
use crate::vertex::CellVertex;

/// Render target texture plus the metadata needed to read it back.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
}

impl OffscreenTarget {
    /// Create a `width` x `height` target in an 8-bit RGBA or BGRA format.
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Result<Self, RenderError> {
        let limit = device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(RenderError::InvalidTargetSize {
                width,
                height,
                limit,
            });
        }
        if !is_readable_format(format) {
            return Err(RenderError::UnsupportedTargetFormat(format));
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cell offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Clear to `clear`, draw `indices` over `vertices`, and read the result back.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cells: &CellRenderPass<'_>,
        vertices: &[CellVertex],
        indices: &[u32],
        clear: [f64; 4],
    ) -> Result<image::RgbaImage, RenderError> {
        let pipeline_format = cells.pipeline().target_format();
        if pipeline_format != self.format {
            return Err(RenderError::TargetFormatMismatch {
                pipeline: pipeline_format,
                target: self.format,
            });
        }

        let buffers = if vertices.is_empty() || indices.is_empty() {
            None
        } else {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cell offscreen vertex buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cell offscreen index buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            Some((vertex_buffer, index_buffer))
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("cell offscreen encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cell offscreen pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0],
                            g: clear[1],
                            b: clear[2],
                            a: clear[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some((vertex_buffer, index_buffer)) = &buffers {
                cells.draw_indexed(
                    &mut render_pass,
                    vertex_buffer,
                    index_buffer,
                    indices.len() as u32,
                );
            }
        }

        // wgpu requires rows to be aligned to 256 bytes
        let bytes_per_pixel = 4u32;
        let unpadded_bytes_per_row = self.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;
        let buffer_size = u64::from(padded_bytes_per_row) * u64::from(self.height);

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cell offscreen readback buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        let _ = device.poll(wgpu::PollType::wait_indefinitely());
        rx.recv()
            .map_err(|e| RenderError::Readback(format!("Failed to receive map result: {}", e)))?
            .map_err(|e| RenderError::Readback(format!("Failed to map buffer: {:?}", e)))?;

        let data = buffer_slice.get_mapped_range();
        let pixels = unpad_rows(
            &data,
            self.width,
            self.height,
            padded_bytes_per_row,
            is_bgra(self.format),
        );
        drop(data);
        output_buffer.unmap();

        log::debug!(
            "Offscreen render complete: {}x{} {:?}, {} indices",
            self.width,
            self.height,
            self.format,
            indices.len()
        );

        image::RgbaImage::from_raw(self.width, self.height, pixels).ok_or_else(|| {
            RenderError::Readback("Pixel buffer does not match target size".to_string())
        })
    }
}

fn is_readable_format(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Rgba8Unorm
            | wgpu::TextureFormat::Rgba8UnormSrgb
            | wgpu::TextureFormat::Bgra8Unorm
            | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

/// Strip row padding and swizzle BGRA to RGBA.
fn unpad_rows(data: &[u8], width: u32, height: u32, padded_bytes_per_row: u32, bgra: bool) -> Vec<u8> {
    let row_bytes = (width * 4) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);

    for y in 0..height as usize {
        let row_start = y * padded_bytes_per_row as usize;
        let row = &data[row_start..row_start + row_bytes];

        if bgra {
            for chunk in row.chunks_exact(4) {
                pixels.extend_from_slice(&[chunk[2], chunk[1], chunk[0], chunk[3]]);
            }
        } else {
            pixels.extend_from_slice(row);
        }
    }

    pixels
}
