use bevy::math::IVec2;
use bevy::prelude::Component;

use crate::primitives::Rect;

/// Absorption state of an [`ExtensionPiece`].
///
/// The only transition is `Unprocessed -> Absorbed`; a piece is never released
/// back into the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PieceState {
  #[default]
  Unprocessed,
  Absorbed,
}

/// Auxiliary rectangle that contributes area to exactly one composite body.
///
/// Pieces without collision only extend the visual footprint of the body:
/// they are tiled (as background tiles) but never push or carry anything.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct ExtensionPiece {
  rect: Rect,
  has_collision: bool,
  state: PieceState,
}

impl ExtensionPiece {
  /// Creates an unprocessed piece with its top-left corner at `position`.
  pub fn new(position: IVec2, width: i32, height: i32, has_collision: bool) -> Self {
    Self {
      rect: Rect::new(position.x, position.y, width, height),
      has_collision,
      state: PieceState::Unprocessed,
    }
  }

  /// World-space rectangle of the piece.
  #[inline]
  pub fn rect(&self) -> Rect {
    self.rect
  }

  #[inline]
  pub fn has_collision(&self) -> bool {
    self.has_collision
  }

  #[inline]
  pub fn state(&self) -> PieceState {
    self.state
  }

  #[inline]
  pub fn is_absorbed(&self) -> bool {
    self.state == PieceState::Absorbed
  }

  /// Marks the piece absorbed and hands out its rectangle.
  ///
  /// Returns `None` if the piece already belongs to a group.
  pub(crate) fn absorb(&mut self) -> Option<Rect> {
    match self.state {
      PieceState::Unprocessed => {
        self.state = PieceState::Absorbed;
        Some(self.rect)
      }
      PieceState::Absorbed => None,
    }
  }
}
