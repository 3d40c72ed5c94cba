mod grid;
mod rect;

pub use grid::Grid;
pub use rect::Rect;
