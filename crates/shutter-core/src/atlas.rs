//! Tile addressing inside the 6×10 sub-frame atlas
//!
//! Tiles are stored row-major but in reverse temporal order: sub-frame 0 (the
//! most recent) sits in the last cell and sub-frame 59 in the first. Getting
//! this backwards plays the scene in reverse, so every lookup goes through
//! [`AtlasCell::of`].

use crate::error::{AtlasError, Result};
use crate::plan::SubframeIndex;
use crate::{ATLAS_COLUMNS, ATLAS_ROWS, SUBFRAME_COUNT};
use glam::{UVec2, Vec2};

/// Row-major cell number inside the atlas grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasCell(u32);

impl AtlasCell {
    /// Cell holding the given sub-frame
    pub fn of(index: SubframeIndex) -> Self {
        Self(SUBFRAME_COUNT - 1 - index.get())
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Sub-frame stored in this cell
    pub fn subframe(self) -> SubframeIndex {
        SubframeIndex(SUBFRAME_COUNT - 1 - self.0)
    }

    /// Grid position as (column, row)
    pub fn grid(self) -> UVec2 {
        let row = self.0 / ATLAS_COLUMNS;
        let col = self.0 - row * ATLAS_COLUMNS;
        UVec2::new(col, row)
    }
}

/// Atlas coordinate for a point inside the tile of `index`.
///
/// `normalized_in_tile` is in `[0, 1]²`; the result is normalized over the
/// whole atlas.
pub fn tile_coord(index: SubframeIndex, normalized_in_tile: Vec2) -> Vec2 {
    let grid = AtlasCell::of(index).grid().as_vec2();
    (normalized_in_tile + grid) / Vec2::new(ATLAS_COLUMNS as f32, ATLAS_ROWS as f32)
}

/// Top-left pixel of the tile of `index`
pub fn tile_origin(index: SubframeIndex, tile_size: UVec2) -> UVec2 {
    AtlasCell::of(index).grid() * tile_size
}

/// Size of one tile for an atlas of the given pixel size
pub fn tile_size_for(atlas_size: UVec2) -> Result<UVec2> {
    if atlas_size.x == 0 || atlas_size.y == 0 {
        return Err(AtlasError::Empty {
            width: atlas_size.x,
            height: atlas_size.y,
        });
    }
    if atlas_size.x % ATLAS_COLUMNS != 0 || atlas_size.y % ATLAS_ROWS != 0 {
        return Err(AtlasError::UnevenGrid {
            width: atlas_size.x,
            height: atlas_size.y,
            columns: ATLAS_COLUMNS,
            rows: ATLAS_ROWS,
        });
    }
    Ok(atlas_size / UVec2::new(ATLAS_COLUMNS, ATLAS_ROWS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(i: u32) -> SubframeIndex {
        SubframeIndex::new(i).unwrap()
    }

    #[test]
    fn latest_subframe_is_last_cell() {
        assert_eq!(AtlasCell::of(index(0)).get(), 59);
        assert_eq!(AtlasCell::of(index(0)).grid(), UVec2::new(5, 9));
        assert_eq!(AtlasCell::of(index(59)).grid(), UVec2::new(0, 0));
        // 59 - 52 = 7 -> second row, second column
        assert_eq!(AtlasCell::of(index(52)).grid(), UVec2::new(1, 1));
    }

    #[test]
    fn cell_round_trips_to_subframe() {
        for i in SubframeIndex::all() {
            assert_eq!(AtlasCell::of(i).subframe(), i);
        }
    }

    #[test]
    fn tile_coord_scales_into_grid() {
        let c = tile_coord(index(59), Vec2::ZERO);
        assert_eq!(c, Vec2::ZERO);

        let c = tile_coord(index(0), Vec2::ONE);
        assert!((c - Vec2::ONE).abs().max_element() < 1e-6);

        let c = tile_coord(index(52), Vec2::new(0.5, 0.5));
        assert!((c.x - 1.5 / 6.0).abs() < 1e-6);
        assert!((c.y - 1.5 / 10.0).abs() < 1e-6);
    }

    #[test]
    fn tile_origin_in_pixels() {
        let tile = UVec2::new(640, 360);
        assert_eq!(tile_origin(index(0), tile), UVec2::new(3200, 3240));
        assert_eq!(tile_origin(index(59), tile), UVec2::ZERO);
    }

    #[test]
    fn tile_size_requires_even_grid() {
        assert_eq!(tile_size_for(UVec2::new(3840, 3600)), Ok(UVec2::new(640, 360)));
        assert!(matches!(
            tile_size_for(UVec2::new(3841, 3600)),
            Err(AtlasError::UnevenGrid { .. })
        ));
        assert!(matches!(tile_size_for(UVec2::new(0, 10)), Err(AtlasError::Empty { .. })));
    }
}
