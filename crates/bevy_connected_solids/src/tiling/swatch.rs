use bevy::math::UVec2;

/// Square block of tile textures addressed by `(column, row)`.
///
/// Row 0 is the top row, matching level space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swatch<T, const N: usize> {
  rows: [[T; N]; N],
}

/// 3x3 swatch of corners, edges and the filler.
pub type EdgeSwatch<T> = Swatch<T, 3>;

/// 2x2 swatch of inner (concave) corners.
pub type InnerCornerSwatch<T> = Swatch<T, 2>;

impl<T, const N: usize> Swatch<T, N> {
  /// Creates a swatch from rows, top row first.
  pub const fn from_rows(rows: [[T; N]; N]) -> Self {
    Self { rows }
  }

  /// Builds a swatch by calling `f` with each `(column, row)` coordinate.
  pub fn from_fn(mut f: impl FnMut(UVec2) -> T) -> Self {
    Self {
      rows: std::array::from_fn(|y| std::array::from_fn(|x| f(UVec2::new(x as u32, y as u32)))),
    }
  }

  /// Texture at `(column, row)`, or `None` outside the swatch.
  #[inline]
  pub fn get(&self, coord: UVec2) -> Option<&T> {
    self
      .rows
      .get(coord.y as usize)
      .and_then(|row| row.get(coord.x as usize))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rows_are_top_first() {
    let swatch = EdgeSwatch::from_rows([["tl", "t", "tr"], ["l", "c", "r"], ["bl", "b", "br"]]);
    assert_eq!(swatch.get(UVec2::new(2, 0)), Some(&"tr"));
    assert_eq!(swatch.get(UVec2::new(0, 2)), Some(&"bl"));
    assert_eq!(swatch.get(UVec2::new(3, 0)), None);
  }

  #[test]
  fn from_fn_passes_column_then_row() {
    let swatch: InnerCornerSwatch<(u32, u32)> = Swatch::from_fn(|c| (c.x, c.y));
    assert_eq!(swatch.get(UVec2::new(1, 0)), Some(&(1, 0)));
    assert_eq!(swatch.get(UVec2::new(0, 1)), Some(&(0, 1)));
  }
}
