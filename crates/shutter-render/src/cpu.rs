//! CPU compositing for targets without a GPU

use crate::atlas::AtlasImage;
use glam::{UVec2, Vec4};
use image::RgbaImage;
use rayon::prelude::*;
use shutter_core::{pixel_color, RenderState};

/// Runs [`pixel_color`] for every output pixel on the rayon pool
pub struct CpuCompositor {
    output_size: UVec2,
}

impl CpuCompositor {
    pub fn new(output_size: UVec2) -> Self {
        Self { output_size }
    }

    /// Output one tile in size, the same as the GPU renderer's default
    pub fn for_atlas(atlas: &AtlasImage) -> Self {
        Self::new(atlas.tile_size())
    }

    pub fn output_size(&self) -> UVec2 {
        self.output_size
    }

    /// Average the active sub-frames of `state` into linear float colors
    pub fn composite(&self, atlas: &AtlasImage, state: &RenderState) -> Vec<Vec4> {
        let size = self.output_size;
        let mut out = vec![Vec4::ZERO; (size.x * size.y) as usize];
        if out.is_empty() {
            return out;
        }

        out.par_chunks_mut(size.x as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, color) in row.iter_mut().enumerate() {
                    *color = pixel_color(UVec2::new(x as u32, y as u32), size, state, atlas);
                }
            });

        log::trace!(
            "CPU composite {}x{} (rate {}, exposure {})",
            size.x,
            size.y,
            state.rate.get(),
            state.exposure.get()
        );
        out
    }

    /// Same as [`CpuCompositor::composite`], quantized to 8 bits per channel
    pub fn composite_rgba8(&self, atlas: &AtlasImage, state: &RenderState) -> RgbaImage {
        let colors = self.composite(atlas, state);
        let bytes = colors
            .iter()
            .flat_map(|c| (c.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round().to_array())
            .map(|v| v as u8)
            .collect();
        // Dimensions match the color buffer by construction.
        RgbaImage::from_raw(self.output_size.x, self.output_size.y, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.output_size.x, self.output_size.y))
    }
}
