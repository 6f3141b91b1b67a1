//! Glyph coverage sampling.
//!
//! The fragment stage reads coverage through the [`CoverageSampler`] seam.
//! On the GPU this is `textureSampleLevel` on the bound atlas; on the CPU it
//! is a [`CoverageAtlas`], an alpha mask sampled with the same filter and
//! addressing policy the host configures on the GPU sampler.

use cellblend_config::{AtlasAddressMode, AtlasFilter, AtlasSamplerSettings};

use crate::error::RenderError;

/// Read-only source of glyph coverage in [0, 1].
///
/// Implementations must be pure: the same `uv` always yields the same value.
pub trait CoverageSampler {
    fn sample_alpha(&self, uv: [f32; 2]) -> f32;
}

/// The same coverage everywhere. Useful for probing the blend curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCoverage(pub f32);

impl CoverageSampler for UniformCoverage {
    fn sample_alpha(&self, _uv: [f32; 2]) -> f32 {
        self.0
    }
}

/// CPU mirror of an alpha-bearing glyph atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageAtlas {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
    settings: AtlasSamplerSettings,
}

impl CoverageAtlas {
    /// Build from one coverage byte per texel, row-major.
    pub fn new(
        width: u32,
        height: u32,
        coverage: Vec<u8>,
        settings: AtlasSamplerSettings,
    ) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if coverage.len() != expected {
            return Err(RenderError::AtlasSize {
                expected,
                actual: coverage.len(),
            });
        }
        Ok(Self {
            width,
            height,
            coverage,
            settings,
        })
    }

    /// Build from RGBA8 texels, keeping only the alpha channel.
    ///
    /// This is the layout uploaded to the GPU atlas: white RGB with coverage
    /// in alpha.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        rgba: &[u8],
        settings: AtlasSamplerSettings,
    ) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RenderError::AtlasSize {
                expected,
                actual: rgba.len(),
            });
        }
        let coverage = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Self::new(width, height, coverage, settings)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn settings(&self) -> AtlasSamplerSettings {
        self.settings
    }

    /// Coverage of one texel after addressing, in [0, 1].
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let (x, y) = match self.settings.address_mode {
            AtlasAddressMode::ClampToEdge => (x.clamp(0, w - 1), y.clamp(0, h - 1)),
            AtlasAddressMode::ClampToBorder => {
                if x < 0 || y < 0 || x >= w || y >= h {
                    return 0.0;
                }
                (x, y)
            }
        };
        f32::from(self.coverage[(y * w + x) as usize]) / 255.0
    }

    fn sample_nearest(&self, uv: [f32; 2]) -> f32 {
        let x = (uv[0] * self.width as f32).floor() as i64;
        let y = (uv[1] * self.height as f32).floor() as i64;
        self.texel(x, y)
    }

    fn sample_linear(&self, uv: [f32; 2]) -> f32 {
        // Texel centers sit at half-integer coordinates. Past one texel
        // outside the atlas every tap addresses the same way, so clamp there
        // to keep the neighbour index in range.
        let (w, h) = (self.width as f32, self.height as f32);
        let x = (uv[0] * w - 0.5).clamp(-1.0, w);
        let y = (uv[1] * h - 0.5).clamp(-1.0, h);
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = lerp(self.texel(x0, y0), self.texel(x0 + 1, y0), fx);
        let bottom = lerp(self.texel(x0, y0 + 1), self.texel(x0 + 1, y0 + 1), fx);
        lerp(top, bottom, fy)
    }
}

impl CoverageSampler for CoverageAtlas {
    fn sample_alpha(&self, uv: [f32; 2]) -> f32 {
        match self.settings.filter {
            AtlasFilter::Nearest => self.sample_nearest(uv),
            AtlasFilter::Linear => self.sample_linear(uv),
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
