//! Procedural stand-in for a captured sub-frame atlas.
//!
//! A bright disc sweeps across a striped backdrop over one second. The
//! backdrop is identical in every tile, so it stays sharp no matter which
//! sub-frames get averaged; only the disc smears.

use glam::{UVec2, Vec2, Vec3};
use image::{Rgba, RgbaImage};
use shutter::core::{ATLAS_COLUMNS, ATLAS_ROWS, SUBFRAME_COUNT};
use shutter::render::{AtlasImage, Result};

pub const DEFAULT_TILE: UVec2 = UVec2::new(320, 180);

/// Build a 6x10 atlas with `tile`-sized cells
pub fn generate(tile: UVec2) -> Result<AtlasImage> {
    let size = tile * UVec2::new(ATLAS_COLUMNS, ATLAS_ROWS);
    log::info!("Generating {}x{} demo atlas", size.x, size.y);

    let pixels = RgbaImage::from_fn(size.x, size.y, |x, y| {
        let cell = UVec2::new(x / tile.x, y / tile.y);
        let cell_index = cell.y * ATLAS_COLUMNS + cell.x;
        // Cell 0 is the oldest capture, cell 59 the newest.
        let t = cell_index as f32 / SUBFRAME_COUNT as f32;
        let local = UVec2::new(x % tile.x, y % tile.y).as_vec2() + 0.5;
        shade(local / tile.as_vec2(), t, tile.as_vec2())
    });

    AtlasImage::from_rgba(pixels)
}

fn shade(uv: Vec2, t: f32, tile: Vec2) -> Rgba<u8> {
    let stripe = if ((uv.x * 12.0) as u32) % 2 == 0 { 0.18 } else { 0.12 };
    let mut color = Vec3::new(stripe, stripe, stripe + 0.06 * uv.y);

    let center = Vec2::new(0.15 + 0.7 * t, 0.5 + 0.25 * (t * std::f32::consts::TAU).sin());
    let aspect = Vec2::new(tile.x / tile.y, 1.0);
    let radius = 0.12;
    if ((uv - center) * aspect).length() < radius {
        color = Vec3::new(1.0, 0.75, 0.2);
    }

    let rgb = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Rgba([rgb.x as u8, rgb.y as u8, rgb.z as u8, 255])
}
