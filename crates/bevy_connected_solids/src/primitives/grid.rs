//! Generic 2D buffer.
//!
//! A [`Grid`] owns a flat row-major buffer. Coordinates follow level space:
//! row 0 is the top row.

use std::ops::Index;

/// Fixed-size 2D buffer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
  data: Box<[T]>,
  width: u32,
  height: u32,
}

impl<T: Clone + Default> Grid<T> {
  pub fn new(width: u32, height: u32) -> Self {
    let len = (width as usize) * (height as usize);
    Self {
      data: vec![T::default(); len].into_boxed_slice(),
      width,
      height,
    }
  }
}

impl<T> Grid<T> {
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  fn offset(&self, x: u32, y: u32) -> Option<usize> {
    (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
  }

  /// Cell at (x, y); `None` outside the grid.
  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Option<&T> {
    self.offset(x, y).map(|i| &self.data[i])
  }

  /// Writes the cell at (x, y). Writes outside the grid are dropped and
  /// return false.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
    let Some(i) = self.offset(x, y) else {
      return false;
    };
    self.data[i] = value;
    true
  }

  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.data
  }

  /// Iterates `(x, y, &value)` in row-major order.
  pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> {
    let width = self.width.max(1);
    self
      .data
      .iter()
      .enumerate()
      .map(move |(i, value)| ((i as u32) % width, (i as u32) / width, value))
  }
}

impl<T> Index<(u32, u32)> for Grid<T> {
  type Output = T;

  #[inline]
  fn index(&self, (x, y): (u32, u32)) -> &T {
    match self.offset(x, y) {
      Some(i) => &self.data[i],
      None => panic!("grid index ({x}, {y}) out of bounds"),
    }
  }
}
