//! Shutter Core - sampling model behind the motion-blur visualizer
//!
//! A looping scene is captured as 60 equally spaced sub-frames packed into a
//! single 6×10 atlas. Two slider values pick how a virtual camera samples that
//! second of footage:
//!
//! - **rate**: how many sub-frames per unit of time are actually taken
//! - **exposure**: how far back in time the shutter stays open
//!
//! The modules here are GPU-free and shared by every consumer:
//!
//! - [`quantize`] snaps raw slider values to valid hardware-like settings
//! - [`plan`] decides which sub-frames contribute to the average
//! - [`atlas`] maps a sub-frame to its tile inside the atlas
//! - [`composite`] is the per-pixel averaging used by the CPU compositor and
//!   mirrored by the WGSL shader
//! - [`state`] and [`controls`] hold the immutable render state, the labels and
//!   thumbnail highlights, and the raw slider values

pub mod atlas;
pub mod composite;
pub mod controls;
pub mod plan;
pub mod quantize;
pub mod state;

mod error;

pub use atlas::{tile_coord, tile_origin, tile_size_for, AtlasCell};
pub use composite::{pixel_color, Accumulator, AtlasSampler};
pub use controls::{Controls, Preset};
pub use error::{AtlasError, Result};
pub use plan::{is_active, ActiveSet, SubframeIndex};
pub use quantize::{quantize_exposure, quantize_rate, ExposureWindow, SamplingRate};
pub use state::{FrameHighlights, Labels, RenderState};

/// Number of sub-frames captured within one nominal second
pub const SUBFRAME_COUNT: u32 = 60;

/// Atlas grid width in tiles
pub const ATLAS_COLUMNS: u32 = 6;

/// Atlas grid height in tiles
pub const ATLAS_ROWS: u32 = 10;
