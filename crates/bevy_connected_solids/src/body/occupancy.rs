//! Occupancy rasterization of a composite body.
//!
//! Each rectangle set of the body is sampled on the body's tile grid: a cell
//! is occupied when its `TILE_SIZE` square overlaps any rectangle of the set.
//! Grids carry a one-cell border on every side that is never occupied, so
//! neighbour lookups at the edge of the group read "empty" without bounds
//! checks in the tiling code.

use bevy::math::IVec2;

use super::{CompositeBody, SolidShape};
use crate::coords::{TILE_SIZE, cell_to_units};
use crate::primitives::{Grid, Rect};

/// Boolean tile grid with a one-cell padding border.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
  cells: Grid<bool>,
  tiles_wide: i32,
  tiles_high: i32,
}

impl OccupancyGrid {
  /// Samples `occupied` for every interior cell of a `tiles_wide` by
  /// `tiles_high` grid. Padding cells are left unoccupied.
  pub fn rasterize(
    tiles_wide: i32,
    tiles_high: i32,
    mut occupied: impl FnMut(IVec2) -> bool,
  ) -> Self {
    let tiles_wide = tiles_wide.max(0);
    let tiles_high = tiles_high.max(0);
    let mut cells = Grid::new((tiles_wide + 2) as u32, (tiles_high + 2) as u32);

    for y in 0..tiles_high {
      for x in 0..tiles_wide {
        if occupied(IVec2::new(x, y)) {
          cells.set((x + 1) as u32, (y + 1) as u32, true);
        }
      }
    }

    Self {
      cells,
      tiles_wide,
      tiles_high,
    }
  }

  #[inline]
  pub fn tiles_wide(&self) -> i32 {
    self.tiles_wide
  }

  #[inline]
  pub fn tiles_high(&self) -> i32 {
    self.tiles_high
  }

  /// Returns whether the cell is occupied. Cells outside the grid, padding
  /// included, read as unoccupied.
  #[inline]
  pub fn is_occupied(&self, cell: IVec2) -> bool {
    let padded = cell + IVec2::ONE;
    if padded.x < 0 || padded.y < 0 {
      return false;
    }
    self
      .cells
      .get(padded.x as u32, padded.y as u32)
      .copied()
      .unwrap_or(false)
  }

  /// Raw padded grid; interior cell `(x, y)` lives at `(x + 1, y + 1)`.
  #[inline]
  pub fn padded(&self) -> &Grid<bool> {
    &self.cells
  }

  /// Iterates occupied cells in row-major order.
  pub fn occupied_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
    self
      .cells
      .iter()
      .filter(|(_, _, occupied)| **occupied)
      .map(|(x, y, _)| IVec2::new(x as i32 - 1, y as i32 - 1))
  }

  /// Number of occupied cells.
  pub fn count(&self) -> usize {
    self.cells.as_slice().iter().filter(|&&c| c).count()
  }
}

/// The two occupancy grids of a composite body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrids {
  /// Cells covered by rectangles that collide.
  pub collidable: OccupancyGrid,
  /// Cells covered by any rectangle, decoration-only pieces included.
  pub all: OccupancyGrid,
}

impl OccupancyGrids {
  /// Returns true if the cell is drawn but has no collision.
  #[inline]
  pub fn is_background_only(&self, cell: IVec2) -> bool {
    self.all.is_occupied(cell) && !self.collidable.is_occupied(cell)
  }
}

/// Rasterizes one rectangle set (body-local) onto the group tile grid.
fn rasterize_set(
  rects: &[Rect],
  group_offset: IVec2,
  tiles_wide: i32,
  tiles_high: i32,
) -> OccupancyGrid {
  let shape = SolidShape::new(rects.to_vec());
  OccupancyGrid::rasterize(tiles_wide, tiles_high, |cell| {
    let cell_rect = Rect::from_min_size(
      group_offset + cell_to_units(cell),
      IVec2::splat(TILE_SIZE),
    );
    shape.overlaps(&cell_rect)
  })
}

impl CompositeBody {
  /// Rebuilds both occupancy grids from the current rectangle sets.
  pub(crate) fn build_grids(&mut self) {
    let offset = self.group_offset();
    let (wide, high) = (self.tiles_wide(), self.tiles_high());
    let grids = OccupancyGrids {
      collidable: rasterize_set(&self.sub_rects, offset, wide, high),
      all: rasterize_set(&self.all_sub_rects, offset, wide, high),
    };
    log::trace!(
      "occupancy built: {}x{} tiles, {} collidable / {} total",
      wide,
      high,
      grids.collidable.count(),
      grids.all.count()
    );
    self.grids = Some(grids);
  }
}
