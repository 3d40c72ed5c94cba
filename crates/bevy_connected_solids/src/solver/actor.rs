use std::fmt;

use super::Actor;
use crate::body::SolidShape;
use crate::coords::Axis;
use crate::primitives::Rect;

/// Why an actor stopped short of the requested move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision {
  pub axis: Axis,
  /// Sign of the attempted move.
  pub direction: i32,
  /// Units covered before the hit.
  pub moved: i32,
  /// Requested displacement.
  pub target: i32,
  /// The solid rectangle that blocked the move.
  pub obstacle: Rect,
}

impl Collision {
  /// Units of the requested move that were not covered.
  #[inline]
  pub fn remaining(&self) -> i32 {
    self.target - self.moved
  }
}

impl fmt::Display for Collision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "blocked after {} of {} units ({:?}) by {:?}",
      self.moved, self.target, self.axis, self.obstacle
    )
  }
}

/// Moves `actor` by `amount` units along `axis`, one unit at a time, stopping
/// in front of the first obstacle.
///
/// Returns the collision if the full distance could not be covered; the actor
/// keeps the distance it did cover.
pub fn move_actor_exact<A: Actor + ?Sized>(
  actor: &mut A,
  axis: Axis,
  amount: i32,
  obstacles: &[SolidShape],
) -> Result<(), Collision> {
  let direction = amount.signum();
  let step = axis.along(direction);
  let mut moved = 0;

  while moved != amount {
    let next = actor.hitbox().translated(step);
    if let Some(obstacle) = obstacles.iter().find_map(|o| o.first_overlap(&next)) {
      return Err(Collision {
        axis,
        direction,
        moved,
        target: amount,
        obstacle,
      });
    }
    actor.translate(step);
    moved += direction;
  }
  Ok(())
}
