//! Render-pass context for drawing cells.
//!
//! [`CellRenderPass`] threads the pipeline and the caller's atlas binding
//! into a `wgpu::RenderPass`. It holds only shared borrows, so the same
//! context can record any number of draws.

use wgpu::{Buffer, IndexFormat, RenderPass};

use crate::pipeline::{AtlasBinding, CellPipeline};
use crate::shader::ATLAS_BIND_GROUP;

/// Indices per cell quad (two triangles).
pub const INDICES_PER_CELL: u32 = 6;

/// Index format expected in the index buffer.
pub const CELL_INDEX_FORMAT: IndexFormat = IndexFormat::Uint32;

/// Number of indices needed to draw `cells` quads.
pub fn quad_index_count(cells: u32) -> u32 {
    cells * INDICES_PER_CELL
}

/// Pipeline plus atlas binding, ready to record cell draws.
#[derive(Clone, Copy)]
pub struct CellRenderPass<'a> {
    pipeline: &'a CellPipeline,
    atlas: &'a AtlasBinding,
}

impl<'a> CellRenderPass<'a> {
    pub fn new(pipeline: &'a CellPipeline, atlas: &'a AtlasBinding) -> Self {
        Self { pipeline, atlas }
    }

    pub fn pipeline(&self) -> &'a CellPipeline {
        self.pipeline
    }

    /// Record an indexed draw of `index_count` indices (u32) from the buffers.
    ///
    /// Records nothing when `index_count` is zero.
    pub fn draw_indexed(
        &self,
        pass: &mut RenderPass<'_>,
        vertex_buffer: &Buffer,
        index_buffer: &Buffer,
        index_count: u32,
    ) {
        if index_count == 0 {
            return;
        }
        self.bind(pass, vertex_buffer);
        pass.set_index_buffer(index_buffer.slice(..), CELL_INDEX_FORMAT);
        pass.draw_indexed(0..index_count, 0, 0..1);
    }

    /// Record a non-indexed triangle-list draw of `vertex_count` vertices.
    ///
    /// Records nothing when `vertex_count` is zero.
    pub fn draw(&self, pass: &mut RenderPass<'_>, vertex_buffer: &Buffer, vertex_count: u32) {
        if vertex_count == 0 {
            return;
        }
        self.bind(pass, vertex_buffer);
        pass.draw(0..vertex_count, 0..1);
    }

    fn bind(&self, pass: &mut RenderPass<'_>, vertex_buffer: &Buffer) {
        pass.set_pipeline(self.pipeline.pipeline());
        pass.set_bind_group(ATLAS_BIND_GROUP, self.atlas.bind_group(), &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_index_count() {
        assert_eq!(quad_index_count(0), 0);
        assert_eq!(quad_index_count(1), 6);
        assert_eq!(quad_index_count(80 * 24), 11_520);
    }
}
