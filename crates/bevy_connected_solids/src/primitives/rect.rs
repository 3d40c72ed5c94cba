use bevy::math::IVec2;

use crate::coords::Axis;

/// An axis-aligned rectangle in whole level units.
///
/// Edges follow the half-open convention: a rectangle covers
/// `x .. x + width` and `y .. y + height`, so two rectangles that only share an
/// edge do not intersect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
}

impl Rect {
  /// Creates a new rectangle.
  #[inline]
  pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// Creates a rectangle from its top-left corner and size.
  #[inline]
  pub const fn from_min_size(min: IVec2, size: IVec2) -> Self {
    Self::new(min.x, min.y, size.x, size.y)
  }

  #[inline]
  pub const fn left(&self) -> i32 {
    self.x
  }

  #[inline]
  pub const fn right(&self) -> i32 {
    self.x + self.width
  }

  #[inline]
  pub const fn top(&self) -> i32 {
    self.y
  }

  #[inline]
  pub const fn bottom(&self) -> i32 {
    self.y + self.height
  }

  /// Top-left corner.
  #[inline]
  pub const fn min(&self) -> IVec2 {
    IVec2::new(self.x, self.y)
  }

  /// Bottom-right corner (exclusive).
  #[inline]
  pub const fn max(&self) -> IVec2 {
    IVec2::new(self.right(), self.bottom())
  }

  #[inline]
  pub const fn size(&self) -> IVec2 {
    IVec2::new(self.width, self.height)
  }

  /// Returns this rectangle moved by `offset`.
  #[inline]
  pub fn translated(&self, offset: IVec2) -> Self {
    Self::from_min_size(self.min() + offset, self.size())
  }

  /// Returns this rectangle grown by `dx` on the left and right and `dy` on the
  /// top and bottom.
  #[inline]
  pub const fn inflated(&self, dx: i32, dy: i32) -> Self {
    Self::new(
      self.x - dx,
      self.y - dy,
      self.width + dx * 2,
      self.height + dy * 2,
    )
  }

  /// Strict overlap test; touching edges do not count.
  #[inline]
  pub const fn intersects(&self, other: &Rect) -> bool {
    self.left() < other.right()
      && self.right() > other.left()
      && self.top() < other.bottom()
      && self.bottom() > other.top()
  }

  /// Smallest rectangle containing both `self` and `other`.
  pub fn union(&self, other: &Rect) -> Self {
    let min = self.min().min(other.min());
    let max = self.max().max(other.max());
    Self::from_min_size(min, max - min)
  }

  /// Edge facing the direction of `delta` along `axis`, i.e. the edge a pushed
  /// object must end up flush against.
  ///
  /// A non-positive delta selects the left/top edge.
  #[inline]
  pub const fn leading_edge(&self, axis: Axis, delta: i32) -> i32 {
    match (axis, delta <= 0) {
      (Axis::Horizontal, true) => self.left(),
      (Axis::Horizontal, false) => self.right(),
      (Axis::Vertical, true) => self.top(),
      (Axis::Vertical, false) => self.bottom(),
    }
  }

  /// Edge facing `delta`'s opposite direction: the right/bottom edge for a
  /// non-positive delta, the left/top edge otherwise.
  #[inline]
  pub const fn trailing_edge(&self, axis: Axis, delta: i32) -> i32 {
    match (axis, delta <= 0) {
      (Axis::Horizontal, true) => self.right(),
      (Axis::Horizontal, false) => self.left(),
      (Axis::Vertical, true) => self.bottom(),
      (Axis::Vertical, false) => self.top(),
    }
  }
}
