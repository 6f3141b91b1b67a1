//! Shared integration test helpers for cellblend.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` below suppresses warnings when a file only uses a
//! subset of the helpers.

#![allow(dead_code)]

use cellblend::{CellVertex, CompositeConfig, FragmentInput};
use std::path::PathBuf;
use tempfile::TempDir;

pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Absolute tolerance for float comparisons against analytic values.
pub const EPSILON: f32 = 1e-5;

pub fn assert_color_eq(actual: [f32; 4], expected: [f32; 4], tolerance: f32) {
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "channel {i}: expected {e}, got {a} (full color {actual:?})"
        );
    }
}

/// Fragment input with the given atlas coordinate and colors.
pub fn fragment(tex_coords: [f32; 2], fg_color: [f32; 4], bg_color: [f32; 4]) -> FragmentInput {
    FragmentInput {
        tex_coords,
        fg_color,
        bg_color,
    }
}

/// Four vertices and six indices covering the NDC rectangle
/// `[x0, x1] x [y0, y1]`, with atlas coordinates `uv0`..`uv1` and flat colors.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left. Both
/// triangles wind counter-clockwise in NDC.
pub fn cell_quad(
    ndc: [f32; 4],
    uv: [f32; 4],
    fg_color: [f32; 4],
    bg_color: [f32; 4],
    base: u32,
) -> ([CellVertex; 4], [u32; 6]) {
    let [x0, y0, x1, y1] = ndc;
    let [u0, v0, u1, v1] = uv;
    let vertex = |position, tex_coords| CellVertex {
        position,
        tex_coords,
        fg_color,
        bg_color,
    };
    let vertices = [
        vertex([x0, y1], [u0, v0]),
        vertex([x1, y1], [u1, v0]),
        vertex([x1, y0], [u1, v1]),
        vertex([x0, y0], [u0, v1]),
    ];
    let indices = [base, base + 3, base + 2, base, base + 2, base + 1];
    (vertices, indices)
}

/// A full-screen quad whose every vertex uses the same atlas coordinate.
pub fn full_screen_quad(
    tex_coords: [f32; 2],
    fg_color: [f32; 4],
    bg_color: [f32; 4],
) -> ([CellVertex; 4], [u32; 6]) {
    let [u, v] = tex_coords;
    cell_quad([-1.0, -1.0, 1.0, 1.0], [u, v, u, v], fg_color, bg_color, 0)
}

/// Temporary directory plus a config file path inside it.
///
/// The `TempDir` must outlive all I/O against the path.
pub fn temp_config_path() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("compositor.yaml");
    (path, temp_dir)
}

pub fn raw_config() -> CompositeConfig {
    CompositeConfig::new().with_variant(cellblend::BlendVariant::Raw)
}

/// Headless device and queue, or `None` when no adapter is available.
///
/// GPU tests call this first and return early on `None`, so the suite stays
/// green on machines without a usable backend.
pub fn try_gpu() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok()?;

    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("cellblend test device"),
        ..Default::default()
    }))
    .ok()
}
