//! Atlas decoding and GPU upload

use crate::gpu::GpuContext;
use crate::Result;
use glam::{UVec2, Vec2, Vec4};
use image::RgbaImage;
use shutter_core::{tile_size_for, AtlasSampler};
use std::path::Path;

/// Decoded atlas image with validated 6×10 tile geometry
#[derive(Clone)]
pub struct AtlasImage {
    pixels: RgbaImage,
    tile_size: UVec2,
}

impl AtlasImage {
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        let tile_size = tile_size_for(UVec2::from(pixels.dimensions()))?;
        Ok(Self { pixels, tile_size })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pixels = image::open(path)?.to_rgba8();
        log::info!("Loaded atlas {} ({}x{})", path.display(), pixels.width(), pixels.height());
        Self::from_rgba(pixels)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let pixels = image::load_from_memory(data)?.to_rgba8();
        Self::from_rgba(pixels)
    }

    pub fn size(&self) -> UVec2 {
        UVec2::from(self.pixels.dimensions())
    }

    pub fn tile_size(&self) -> UVec2 {
        self.tile_size
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let size = self.size();
        let x = x.clamp(0, size.x as i64 - 1) as u32;
        let y = y.clamp(0, size.y as i64 - 1) as u32;
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}

impl AtlasSampler for AtlasImage {
    /// Bilinear, clamp-to-edge; the same filtering as the GPU sampler
    fn sample(&self, coord: Vec2) -> Vec4 {
        let texel = coord * self.size().as_vec2() - 0.5;
        let base = texel.floor();
        let t = texel - base;
        let (x0, y0) = (base.x as i64, base.y as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), t.x);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), t.x);
        top.lerp(bottom, t.y)
    }
}

/// Atlas uploaded as a sampled texture
pub struct AtlasTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: UVec2,
    pub tile_size: UVec2,
}

impl AtlasTexture {
    pub fn upload(ctx: &GpuContext, atlas: &AtlasImage) -> Self {
        let size = atlas.size();
        let extent = wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        };

        // Linear format: the average happens on raw stored values.
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Subframe Atlas"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            atlas.pixels().as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.x),
                rows_per_image: Some(size.y),
            },
            extent,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Subframe Atlas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size,
            tile_size: atlas.tile_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker_atlas() -> AtlasImage {
        // 2×1 tiles -> 12×10 pixels
        let pixels = RgbaImage::from_fn(12, 10, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        AtlasImage::from_rgba(pixels).unwrap()
    }

    #[test]
    fn tile_size_is_derived_from_dimensions() {
        assert_eq!(checker_atlas().tile_size(), UVec2::new(2, 1));
        assert!(AtlasImage::from_rgba(RgbaImage::new(13, 10)).is_err());
    }

    #[test]
    fn texel_centers_sample_exactly() {
        let atlas = checker_atlas();
        let size = atlas.size().as_vec2();
        let red = atlas.sample(Vec2::new(0.5, 0.5) / size);
        assert!((red - Vec4::new(1.0, 0.0, 0.0, 1.0)).abs().max_element() < 1e-5);
        let blue = atlas.sample(Vec2::new(1.5, 0.5) / size);
        assert!((blue - Vec4::new(0.0, 0.0, 1.0, 1.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn between_texels_blends() {
        let atlas = checker_atlas();
        let size = atlas.size().as_vec2();
        let mid = atlas.sample(Vec2::new(1.0, 0.5) / size);
        assert!((mid - Vec4::new(0.5, 0.0, 0.5, 1.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn edges_clamp() {
        let atlas = checker_atlas();
        assert_eq!(atlas.sample(Vec2::ZERO), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(atlas.sample(Vec2::new(-1.0, -1.0)), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn undecodable_bytes_are_asset_errors() {
        let err = AtlasImage::from_bytes(b"not an image").err().unwrap();
        assert!(matches!(err, crate::Error::Asset(_)));
    }
}
