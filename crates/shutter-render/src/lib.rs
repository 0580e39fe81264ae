//! Shutter Render - compositing backends for the motion-blur visualizer
//!
//! Two substrates run the same per-pixel average:
//!
//! - [`Renderer`] draws a fullscreen WGSL pass with wgpu
//! - [`CpuCompositor`] maps [`shutter_core::pixel_color`] over the output with rayon
//!
//! [`Visualization`] ties the sliders to a renderer and owns the failure policy:
//! when the GPU is unavailable or setup fails, rendering is switched off once
//! and the controls keep working.

pub mod passes;

mod atlas;
mod cpu;
mod gpu;
mod renderer;
mod visualization;

pub use atlas::{AtlasImage, AtlasTexture};
pub use cpu::CpuCompositor;
pub use gpu::GpuContext;
pub use renderer::{RenderOutcome, Renderer, RendererConfig};
pub use visualization::{RenderStatus, Visualization};

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running a compositing pass
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported environment: {0}")]
    Unsupported(String),

    #[error("Shader error: {0}")]
    Shader(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Atlas error: {0}")]
    Atlas(#[from] shutter_core::AtlasError),

    #[error("WGPU error: {0}")]
    Wgpu(String),
}

impl From<wgpu::Error> for Error {
    fn from(err: wgpu::Error) -> Self {
        Error::Wgpu(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Asset(err.to_string())
    }
}
