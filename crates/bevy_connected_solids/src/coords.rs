//! Coordinate conventions and spatial constants.
//!
//! Level space follows the host platformer's conventions:
//! - **X+** is to the right
//! - **Y+** is downward (row 0 of a swatch is its top row)
//! - positions are whole units; sub-unit motion is accumulated by the caller
//!
//! The tile grid of a composite body is aligned to its group bounds, not to the
//! world origin. Cell `(0, 0)` covers `group_min .. group_min + TILE_SIZE`.

use bevy::math::IVec2;

/// Size of an auto-tiling cell in level units.
pub const TILE_SIZE: i32 = 8;

/// Axis of a kinematic move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
  Horizontal,
  Vertical,
}

impl Axis {
  /// Both axes in the order moves are resolved (horizontal first).
  pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

  /// Returns the unit vector along this axis.
  #[inline]
  pub const fn unit(self) -> IVec2 {
    match self {
      Axis::Horizontal => IVec2::X,
      Axis::Vertical => IVec2::Y,
    }
  }

  /// Returns a vector of `amount` units along this axis.
  #[inline]
  pub fn along(self, amount: i32) -> IVec2 {
    self.unit() * amount
  }

  /// Returns the component of `v` that lies on this axis.
  #[inline]
  pub const fn component(self, v: IVec2) -> i32 {
    match self {
      Axis::Horizontal => v.x,
      Axis::Vertical => v.y,
    }
  }
}

/// Number of whole tiles that fit in `length` units.
#[inline]
pub const fn tiles_in(length: i32) -> i32 {
  length / TILE_SIZE
}

/// Converts a cell coordinate to its top-left corner in group space.
#[inline]
pub fn cell_to_units(cell: IVec2) -> IVec2 {
  cell * TILE_SIZE
}
