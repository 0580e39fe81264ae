//! Per-pixel sub-frame averaging
//!
//! `composite.wgsl` runs the same loop on the GPU. The CPU compositor in
//! `shutter-render` maps [`pixel_color`] over every output pixel.

use crate::atlas::tile_coord;
use crate::plan::{is_active, SubframeIndex};
use crate::state::RenderState;
use glam::{UVec2, Vec2, Vec4};

/// Read-only access to the decoded atlas
pub trait AtlasSampler {
    /// Filtered RGBA color at a normalized atlas coordinate
    fn sample(&self, coord: Vec2) -> Vec4;
}

/// Running color sum for one output pixel
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    sum: Vec4,
    count: u32,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: Vec4) {
        self.sum += color;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean of every added color, or `None` if nothing was added
    pub fn resolve(&self) -> Option<Vec4> {
        (self.count > 0).then(|| self.sum / self.count as f32)
    }
}

/// Averaged color of output pixel `pixel` for `state`.
///
/// The pixel center is normalized against `output_size` and looked up in the
/// tile of every active sub-frame.
pub fn pixel_color<S>(pixel: UVec2, output_size: UVec2, state: &RenderState, atlas: &S) -> Vec4
where
    S: AtlasSampler + ?Sized,
{
    let normalized = (pixel.as_vec2() + 0.5) / output_size.as_vec2();

    let mut acc = Accumulator::new();
    for index in SubframeIndex::all() {
        if !is_active(index, state.rate, state.exposure) {
            continue;
        }
        acc.add(atlas.sample(tile_coord(index, normalized)));
    }

    // Sub-frame 0 is always active, so the accumulator is never empty.
    acc.resolve().unwrap_or(Vec4::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasCell;
    use crate::quantize::{ExposureWindow, SamplingRate};
    use crate::{ATLAS_COLUMNS, ATLAS_ROWS};

    /// Flat color per tile: red channel encodes the sub-frame index.
    struct IndexAtlas;

    impl AtlasSampler for IndexAtlas {
        fn sample(&self, coord: Vec2) -> Vec4 {
            let col = (coord.x * ATLAS_COLUMNS as f32).floor() as u32;
            let row = (coord.y * ATLAS_ROWS as f32).floor() as u32;
            let cell = row * ATLAS_COLUMNS + col;
            let index = 59 - cell;
            Vec4::new(index as f32, 1.0, 0.0, 1.0)
        }
    }

    /// Returns the coordinate it was asked for.
    struct CoordAtlas;

    impl AtlasSampler for CoordAtlas {
        fn sample(&self, coord: Vec2) -> Vec4 {
            Vec4::new(coord.x, coord.y, 0.0, 1.0)
        }
    }

    fn state(rate: u32, exposure: u32) -> RenderState {
        RenderState::new(
            SamplingRate::new(rate).unwrap(),
            ExposureWindow::new(exposure).unwrap(),
        )
    }

    #[test]
    fn single_sample_is_unchanged() {
        for rate in SamplingRate::all() {
            let s = RenderState::new(rate, ExposureWindow::MIN);
            let c = pixel_color(UVec2::new(3, 2), UVec2::new(8, 8), &s, &IndexAtlas);
            assert_eq!(c, Vec4::new(0.0, 1.0, 0.0, 1.0));
        }
    }

    #[test]
    fn averages_active_tiles() {
        // {0, 15, 30, 45} -> mean index 22.5
        let c = pixel_color(UVec2::ZERO, UVec2::new(4, 4), &state(4, 60), &IndexAtlas);
        assert!((c.x - 22.5).abs() < 1e-5);
        assert!((c.y - 1.0).abs() < 1e-6);

        // {0..=4} -> mean index 2
        let c = pixel_color(UVec2::new(1, 1), UVec2::new(4, 4), &state(60, 5), &IndexAtlas);
        assert!((c.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn every_pixel_stays_inside_its_tile() {
        let size = UVec2::new(5, 3);
        for y in 0..size.y {
            for x in 0..size.x {
                let c = pixel_color(UVec2::new(x, y), size, &state(60, 1), &IndexAtlas);
                assert_eq!(c.x, 0.0, "pixel ({x}, {y}) leaked out of tile");
            }
        }
        assert_eq!(AtlasCell::of(SubframeIndex::LATEST).get(), 59);
    }

    #[test]
    fn pixel_origin_is_top_left_of_latest_tile() {
        // Latest tile is cell 59: column 5, row 9.
        let size = UVec2::new(4, 4);
        let s = state(60, 0);

        let top_left = pixel_color(UVec2::ZERO, size, &s, &CoordAtlas);
        assert!((top_left.x - (5.0 + 0.125) / 6.0).abs() < 1e-6);
        assert!((top_left.y - (9.0 + 0.125) / 10.0).abs() < 1e-6);

        let bottom_right = pixel_color(UVec2::new(3, 3), size, &s, &CoordAtlas);
        assert!((bottom_right.x - (5.0 + 0.875) / 6.0).abs() < 1e-6);
        assert!((bottom_right.y - (9.0 + 0.875) / 10.0).abs() < 1e-6);
    }

    #[test]
    fn empty_accumulator_does_not_resolve() {
        assert!(Accumulator::new().resolve().is_none());
        let mut acc = Accumulator::new();
        acc.add(Vec4::splat(2.0));
        acc.add(Vec4::splat(4.0));
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.resolve(), Some(Vec4::splat(3.0)));
    }
}
