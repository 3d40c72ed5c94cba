//! Auto-tiling of composite bodies.
//!
//! Every occupied cell is classified once from its eight neighbours into a
//! [`TileKind`] plus a swatch coordinate. The classification is cached on the
//! body ([`TileTopology`]); swatches are only consulted when tiles are placed.

mod autotile;
mod swatch;

pub use autotile::{PlacedTile, TileCell, TileTopology};
use bevy::math::{IVec2, UVec2};
pub use swatch::{EdgeSwatch, InnerCornerSwatch, Swatch};

use crate::body::OccupancyGrid;

bitflags::bitflags! {
  /// Occupied neighbours of a cell.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct Neighbors: u8 {
    const UP = 0b0000_0001;
    const DOWN = 0b0000_0010;
    const LEFT = 0b0000_0100;
    const RIGHT = 0b0000_1000;
    const UP_LEFT = 0b0001_0000;
    const UP_RIGHT = 0b0010_0000;
    const DOWN_LEFT = 0b0100_0000;
    const DOWN_RIGHT = 0b1000_0000;

    const ORTHOGONAL = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    const DIAGONAL = Self::UP_LEFT.bits()
      | Self::UP_RIGHT.bits()
      | Self::DOWN_LEFT.bits()
      | Self::DOWN_RIGHT.bits();
  }
}

/// Neighbour offsets in level space (Y+ down).
const OFFSETS: [(Neighbors, IVec2); 8] = [
  (Neighbors::UP, IVec2::new(0, -1)),
  (Neighbors::DOWN, IVec2::new(0, 1)),
  (Neighbors::LEFT, IVec2::new(-1, 0)),
  (Neighbors::RIGHT, IVec2::new(1, 0)),
  (Neighbors::UP_LEFT, IVec2::new(-1, -1)),
  (Neighbors::UP_RIGHT, IVec2::new(1, -1)),
  (Neighbors::DOWN_LEFT, IVec2::new(-1, 1)),
  (Neighbors::DOWN_RIGHT, IVec2::new(1, 1)),
];

/// Diagonals in first-match order for inner corners.
const INNER_CORNERS: [(Neighbors, UVec2); 4] = [
  (Neighbors::UP_LEFT, UVec2::new(0, 0)),
  (Neighbors::UP_RIGHT, UVec2::new(1, 0)),
  (Neighbors::DOWN_LEFT, UVec2::new(0, 1)),
  (Neighbors::DOWN_RIGHT, UVec2::new(1, 1)),
];

impl Neighbors {
  /// Samples the eight neighbours of `cell`.
  pub fn sample(grid: &OccupancyGrid, cell: IVec2) -> Self {
    OFFSETS
      .iter()
      .filter(|(_, offset)| grid.is_occupied(cell + *offset))
      .fold(Neighbors::empty(), |acc, (flag, _)| acc | *flag)
  }
}

/// Open orthogonal sides mapped to border tiles of the edge swatch.
const BORDERS: [(Neighbors, TileKind, UVec2); 8] = [
  (Neighbors::UP, TileKind::Edge, UVec2::new(1, 0)),
  (Neighbors::DOWN, TileKind::Edge, UVec2::new(1, 2)),
  (Neighbors::LEFT, TileKind::Edge, UVec2::new(0, 1)),
  (Neighbors::RIGHT, TileKind::Edge, UVec2::new(2, 1)),
  (Neighbors::UP.union(Neighbors::LEFT), TileKind::Corner, UVec2::new(0, 0)),
  (Neighbors::UP.union(Neighbors::RIGHT), TileKind::Corner, UVec2::new(2, 0)),
  (Neighbors::DOWN.union(Neighbors::LEFT), TileKind::Corner, UVec2::new(0, 2)),
  (Neighbors::DOWN.union(Neighbors::RIGHT), TileKind::Corner, UVec2::new(2, 2)),
];

/// Which swatch a tile is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
  /// Interior tile, centre of the edge swatch.
  Filler,
  /// Border tile with one open side, from the edge swatch.
  Edge,
  /// Border tile with two adjacent open sides, from the edge swatch.
  Corner,
  /// Concave corner, from the inner-corner swatch.
  InnerCorner,
}

/// Classifies a cell from its neighbour mask.
///
/// Returns the tile kind and the coordinate in the matching swatch
/// (3x3 edge swatch, or 2x2 inner-corner swatch for [`TileKind::InnerCorner`]).
pub fn classify(neighbors: Neighbors) -> (TileKind, UVec2) {
  const FILLER: (TileKind, UVec2) = (TileKind::Filler, UVec2::new(1, 1));

  if neighbors.is_all() {
    return FILLER;
  }

  let missing = Neighbors::ORTHOGONAL.difference(neighbors);
  if missing.is_empty() {
    return INNER_CORNERS
      .iter()
      .find(|(diagonal, _)| !neighbors.contains(*diagonal))
      .map(|&(_, coord)| (TileKind::InnerCorner, coord))
      .unwrap_or(FILLER);
  }

  BORDERS
    .iter()
    .find(|(open, _, _)| missing == *open)
    .map(|&(_, kind, coord)| (kind, coord))
    .unwrap_or(FILLER)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn without(flags: Neighbors) -> Neighbors {
    Neighbors::all().difference(flags)
  }

  #[test]
  fn saturated_cell_is_filler() {
    assert_eq!(classify(Neighbors::all()), (TileKind::Filler, UVec2::new(1, 1)));
  }

  #[test]
  fn single_open_side_is_an_edge() {
    assert_eq!(
      classify(without(Neighbors::UP | Neighbors::UP_LEFT)),
      (TileKind::Edge, UVec2::new(1, 0))
    );
    assert_eq!(
      classify(without(Neighbors::DOWN)),
      (TileKind::Edge, UVec2::new(1, 2))
    );
    assert_eq!(
      classify(without(Neighbors::LEFT)),
      (TileKind::Edge, UVec2::new(0, 1))
    );
    assert_eq!(
      classify(without(Neighbors::RIGHT | Neighbors::DIAGONAL)),
      (TileKind::Edge, UVec2::new(2, 1))
    );
  }

  #[test]
  fn adjacent_open_sides_are_corners() {
    let cases = [
      (Neighbors::UP | Neighbors::LEFT, UVec2::new(0, 0)),
      (Neighbors::UP | Neighbors::RIGHT, UVec2::new(2, 0)),
      (Neighbors::DOWN | Neighbors::LEFT, UVec2::new(0, 2)),
      (Neighbors::DOWN | Neighbors::RIGHT, UVec2::new(2, 2)),
    ];
    for (open, coord) in cases {
      assert_eq!(classify(without(open)), (TileKind::Corner, coord));
    }
  }

  #[test]
  fn opposite_open_sides_fall_back_to_filler() {
    assert_eq!(
      classify(without(Neighbors::UP | Neighbors::DOWN)).0,
      TileKind::Filler
    );
    assert_eq!(classify(Neighbors::empty()).0, TileKind::Filler);
    assert_eq!(classify(Neighbors::UP).0, TileKind::Filler);
  }

  #[test]
  fn missing_diagonal_is_an_inner_corner() {
    assert_eq!(
      classify(without(Neighbors::DOWN_RIGHT)),
      (TileKind::InnerCorner, UVec2::new(1, 1))
    );
    assert_eq!(
      classify(without(Neighbors::UP_RIGHT)),
      (TileKind::InnerCorner, UVec2::new(1, 0))
    );
  }

  #[test]
  fn several_missing_diagonals_take_the_first_in_order() {
    assert_eq!(
      classify(without(Neighbors::DOWN_RIGHT | Neighbors::UP_RIGHT)),
      (TileKind::InnerCorner, UVec2::new(1, 0))
    );
    assert_eq!(
      classify(Neighbors::ORTHOGONAL),
      (TileKind::InnerCorner, UVec2::new(0, 0))
    );
  }

  #[test]
  fn sample_reads_padding_as_empty() {
    let grid = OccupancyGrid::rasterize(1, 1, |_| true);
    assert_eq!(Neighbors::sample(&grid, IVec2::ZERO), Neighbors::empty());

    let grid = OccupancyGrid::rasterize(2, 1, |_| true);
    assert_eq!(Neighbors::sample(&grid, IVec2::ZERO), Neighbors::RIGHT);
  }
}
