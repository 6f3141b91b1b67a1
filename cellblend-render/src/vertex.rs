//! Cell vertex layout and the vertex stage.
//!
//! One [`CellVertex`] is produced per quad corner by the caller's vertex
//! buffer builder. The vertex stage places it in clip space and hands the
//! remaining attributes to the rasterizer unchanged.

use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode};

/// Per-vertex attributes of a cell quad corner.
///
/// Layout (48 bytes, one buffer, per-vertex step):
///   [0..8]   position:   vec2<f32>  (normalized device coordinates)
///   [8..16]  tex_coords: vec2<f32>  (atlas UV, (0,0) = no glyph)
///   [16..32] fg_color:   vec4<f32>  (straight alpha)
///   [32..48] bg_color:   vec4<f32>  (straight alpha)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub fg_color: [f32; 4],
    pub bg_color: [f32; 4],
}

impl CellVertex {
    const ATTRIBS: [VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
        3 => Float32x4,
    ];

    /// Vertex buffer layout matching `vs_main`'s inputs.
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<CellVertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    /// The attribute table, exposed so callers can check slot assignments.
    pub fn attributes() -> &'static [VertexAttribute] {
        &Self::ATTRIBS
    }
}

/// Vertex stage output: clip position plus the interpolants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexOutput {
    pub clip_position: [f32; 4],
    pub tex_coords: [f32; 2],
    pub fg_color: [f32; 4],
    pub bg_color: [f32; 4],
}

/// Interpolated inputs seen by a single fragment invocation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FragmentInput {
    pub tex_coords: [f32; 2],
    pub fg_color: [f32; 4],
    pub bg_color: [f32; 4],
}

impl From<VertexOutput> for FragmentInput {
    fn from(v: VertexOutput) -> Self {
        Self {
            tex_coords: v.tex_coords,
            fg_color: v.fg_color,
            bg_color: v.bg_color,
        }
    }
}

impl FragmentInput {
    /// Linearly interpolate the interpolants of a triangle with barycentric
    /// `weights`, the way the rasterizer does for a covered pixel.
    pub fn barycentric(corners: &[VertexOutput; 3], weights: [f32; 3]) -> Self {
        let mut tex_coords = [0.0; 2];
        let mut fg_color = [0.0; 4];
        let mut bg_color = [0.0; 4];
        for (corner, w) in corners.iter().zip(weights) {
            for (dst, src) in tex_coords.iter_mut().zip(corner.tex_coords) {
                *dst += src * w;
            }
            for (dst, src) in fg_color.iter_mut().zip(corner.fg_color) {
                *dst += src * w;
            }
            for (dst, src) in bg_color.iter_mut().zip(corner.bg_color) {
                *dst += src * w;
            }
        }
        Self {
            tex_coords,
            fg_color,
            bg_color,
        }
    }
}

/// Place a cell vertex in clip space.
///
/// `position` is already in NDC, so no projection is applied. Non-finite
/// input propagates unchanged.
pub fn vertex_stage(v: &CellVertex) -> VertexOutput {
    VertexOutput {
        clip_position: [v.position[0], v.position[1], 0.0, 1.0],
        tex_coords: v.tex_coords,
        fg_color: v.fg_color,
        bg_color: v.bg_color,
    }
}
