//! Main renderer implementation

use crate::atlas::{AtlasImage, AtlasTexture};
use crate::gpu::GpuContext;
use crate::passes::CompositePass;
use crate::{Error, Result};
use glam::UVec2;
use image::RgbaImage;
use shutter_core::RenderState;

/// Main renderer configuration
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    pub target_format: wgpu::TextureFormat,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            target_format: wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

impl RendererConfig {
    /// Output sized to a single atlas tile
    pub fn for_atlas(atlas: &AtlasImage) -> Self {
        let tile = atlas.tile_size();
        Self {
            width: tile.x,
            height: tile.y,
            ..Default::default()
        }
    }

    pub fn with_target_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.target_format = format;
        self
    }
}

/// What a call to [`Renderer::render`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn,
    /// No atlas loaded yet; nothing was recorded
    AtlasPending,
}

/// Composites the sub-frame atlas into a target with wgpu.
///
/// The atlas slot doubles as the asset gate: until [`Renderer::load_atlas`]
/// succeeds, [`Renderer::render`] is a no-op.
pub struct Renderer {
    ctx: GpuContext,
    config: RendererConfig,
    pass: CompositePass,
    atlas: Option<AtlasTexture>,
    frame_count: u64,
}

impl Renderer {
    pub fn new(ctx: GpuContext, config: RendererConfig) -> Result<Self> {
        log::info!("Creating Shutter renderer");
        log::info!("  Target format: {:?}", config.target_format);
        log::info!("  Resolution: {}x{}", config.width, config.height);

        ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pass = CompositePass::new(&ctx.device, config.target_format);
        if let Some(err) = pollster::block_on(ctx.device.pop_error_scope()) {
            return Err(Error::Shader(err.to_string()));
        }

        Ok(Self {
            ctx,
            config,
            pass,
            atlas: None,
            frame_count: 0,
        })
    }

    /// Upload `atlas` and open the gate
    pub fn load_atlas(&mut self, atlas: &AtlasImage) -> Result<()> {
        let device = &self.ctx.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = AtlasTexture::upload(&self.ctx, atlas);
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(Error::Asset(format!("atlas upload failed: {err}")));
        }

        self.pass.bind_atlas(device, &texture);
        log::info!(
            "Atlas ready: {}x{} ({}x{} tiles)",
            texture.size.x,
            texture.size.y,
            texture.tile_size.x,
            texture.tile_size.y
        );
        self.atlas = Some(texture);
        Ok(())
    }

    /// Whether an atlas has been loaded
    pub fn is_ready(&self) -> bool {
        self.atlas.is_some() && self.pass.has_atlas()
    }

    /// Composite `state` into `target`
    pub fn render(&mut self, state: &RenderState, target: &wgpu::TextureView) -> Result<RenderOutcome> {
        if !self.is_ready() {
            log::trace!("Skipping frame {}: atlas not loaded", self.frame_count);
            return Ok(RenderOutcome::AtlasPending);
        }
        log::trace!(
            "Rendering frame {} (rate {}, exposure {})",
            self.frame_count,
            state.rate.get(),
            state.exposure.get()
        );

        self.pass.prepare(&self.ctx.queue, state, self.output_size());

        let mut encoder = self.ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Composite Encoder"),
        });
        self.pass.execute(&mut encoder, target);
        self.ctx.queue.submit(Some(encoder.finish()));

        self.frame_count += 1;
        Ok(RenderOutcome::Drawn)
    }

    /// Render offscreen and read the result back.
    ///
    /// Returns `Ok(None)` while the atlas is pending. Requires an
    /// `Rgba8Unorm` target format.
    pub fn render_to_image(&mut self, state: &RenderState) -> Result<Option<RgbaImage>> {
        if self.config.target_format != wgpu::TextureFormat::Rgba8Unorm {
            return Err(Error::Unsupported(format!(
                "readback needs Rgba8Unorm, renderer targets {:?}",
                self.config.target_format
            )));
        }
        if !self.is_ready() {
            return Ok(None);
        }

        let size = self.output_size();
        let extent = wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        };
        let target = self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Composite Readback Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.config.target_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        self.render(state, &view)?;

        let pixels = read_texture_rgba8(&self.ctx, &target, size)?;
        Ok(RgbaImage::from_raw(size.x, size.y, pixels))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        log::info!("Resizing renderer to {}x{}", width, height);
        self.config.width = width.max(1);
        self.config.height = height.max(1);
    }

    pub fn output_size(&self) -> UVec2 {
        UVec2::new(self.config.width, self.config.height)
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.ctx.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.ctx.queue
    }
}

/// Copy a 4-byte-per-texel texture into tightly packed rows
fn read_texture_rgba8(ctx: &GpuContext, texture: &wgpu::Texture, size: UVec2) -> Result<Vec<u8>> {
    let unpadded_bytes_per_row = size.x * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

    let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Composite Readback Buffer"),
        size: (padded_bytes_per_row * size.y) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Composite Readback Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(size.y),
            },
        },
        wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
    );
    ctx.queue.submit(Some(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    ctx.device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| Error::Wgpu(format!("device poll failed: {e:?}")))?;
    rx.recv()
        .map_err(|e| Error::Wgpu(format!("readback channel closed: {e}")))?
        .map_err(|e| Error::Wgpu(format!("readback map failed: {e}")))?;

    let mapped = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * size.y) as usize);
    for row in 0..size.y {
        let start = (row * padded_bytes_per_row) as usize;
        pixels.extend_from_slice(&mapped[start..start + unpadded_bytes_per_row as usize]);
    }
    drop(mapped);
    staging.unmap();

    Ok(pixels)
}
