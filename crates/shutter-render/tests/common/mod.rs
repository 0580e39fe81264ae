#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use shutter_core::{tile_origin, SubframeIndex, ATLAS_COLUMNS, ATLAS_ROWS};
use shutter_render::AtlasImage;

pub const TILE_W: u32 = 8;
pub const TILE_H: u32 = 6;

/// Flat color per tile, derived from the sub-frame it holds
pub fn tile_color(index: SubframeIndex) -> [u8; 4] {
    let i = index.get() as u8;
    [i * 4, 255 - i * 4, (i % 7) * 30, 255]
}

/// Atlas whose tiles are solid colors keyed by sub-frame index
pub fn flat_atlas() -> AtlasImage {
    let tile = glam::UVec2::new(TILE_W, TILE_H);
    let mut pixels = RgbaImage::new(TILE_W * ATLAS_COLUMNS, TILE_H * ATLAS_ROWS);
    for index in SubframeIndex::all() {
        let origin = tile_origin(index, tile);
        for y in 0..TILE_H {
            for x in 0..TILE_W {
                pixels.put_pixel(origin.x + x, origin.y + y, Rgba(tile_color(index)));
            }
        }
    }
    AtlasImage::from_rgba(pixels).expect("atlas dimensions are a 6x10 grid")
}

/// Texel of the gradient atlas: red runs along x inside the tile, green
/// along y, blue tags the sub-frame.
pub fn gradient_texel(index: SubframeIndex, x: u32, y: u32) -> [u8; 4] {
    [20 + x as u8 * 30, 20 + y as u8 * 40, index.get() as u8 * 4, 255]
}

/// Atlas whose tiles share one gradient, so a flipped or mirrored lookup
/// shows up as a wrong color
pub fn gradient_atlas() -> AtlasImage {
    let tile = glam::UVec2::new(TILE_W, TILE_H);
    let mut pixels = RgbaImage::new(TILE_W * ATLAS_COLUMNS, TILE_H * ATLAS_ROWS);
    for index in SubframeIndex::all() {
        let origin = tile_origin(index, tile);
        for y in 0..TILE_H {
            for x in 0..TILE_W {
                pixels.put_pixel(origin.x + x, origin.y + y, Rgba(gradient_texel(index, x, y)));
            }
        }
    }
    AtlasImage::from_rgba(pixels).expect("atlas dimensions are a 6x10 grid")
}

/// Mean tile color over `indices`, per channel in [0, 1]
pub fn mean_color(indices: &[u32]) -> [f32; 4] {
    let mut sum = [0.0f32; 4];
    for &i in indices {
        let c = tile_color(SubframeIndex::new(i).unwrap());
        for ch in 0..4 {
            sum[ch] += c[ch] as f32 / 255.0;
        }
    }
    sum.map(|v| v / indices.len() as f32)
}
