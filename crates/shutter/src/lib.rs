//! Shutter - how frame rate and exposure shape motion blur
//!
//! A second of footage is captured as 60 sub-frames in one atlas. A virtual
//! camera samples some of them, based on its frame rate and how long its
//! shutter stays open, and the sampled sub-frames are averaged into the image
//! it would record.

pub use shutter_core as core;
pub use shutter_render as render;

pub use glam;
pub use wgpu;

pub mod prelude {
    pub use crate::core::{
        ActiveSet, Controls, ExposureWindow, FrameHighlights, Labels, Preset, RenderState,
        SamplingRate, SubframeIndex,
    };
    pub use crate::render::{
        AtlasImage, CpuCompositor, GpuContext, RenderOutcome, RenderStatus, Renderer,
        RendererConfig, Visualization,
    };
}
