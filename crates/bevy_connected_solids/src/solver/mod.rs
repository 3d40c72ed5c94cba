//! Kinematic carrying solver.
//!
//! Moving a [`CompositeBody`](crate::body::CompositeBody) pushes every actor it
//! runs into and carries every actor riding on it. The solver is generic over
//! [`Actor`], so hosts can plug in their own dynamic bodies; the Bevy layer
//! implements it for [`SolidActor`](crate::components::SolidActor).
//!
//! Moves are resolved one axis at a time in whole units. Callers that move by
//! fractional amounts accumulate the remainder themselves (see
//! [`MoveRemainder`](crate::components::MoveRemainder)).

mod actor;
mod carry;
mod guard;

pub use actor::{Collision, move_actor_exact};
use bevy::math::{IVec2, Vec2};
pub use carry::CollideMove;
pub use guard::{ForcedCollidable, Suspended};

use crate::body::SolidShape;
use crate::coords::Axis;
use crate::primitives::Rect;

/// A dynamic body that solids can push and carry.
pub trait Actor {
  /// World-space hitbox at the current position.
  fn hitbox(&self) -> Rect;

  /// Moves the actor without any collision checks.
  fn translate(&mut self, offset: IVec2);

  fn is_collidable(&self) -> bool;

  fn set_collidable(&mut self, collidable: bool);

  /// Whether moving solids may push or carry this actor at all.
  fn allows_pushing(&self) -> bool {
    true
  }

  /// Naive actors are never pushed out of solids; when riding they are carried
  /// by plain translation.
  fn treats_naive(&self) -> bool {
    false
  }

  /// Whether the actor rides `solid`. Defaults to standing on top of it.
  fn is_riding(&self, solid: &SolidShape) -> bool {
    solid.overlaps(&self.hitbox().translated(IVec2::Y))
  }

  /// Receives the lift speed of the solid that moved the actor.
  fn set_lift_speed(&mut self, _lift_speed: Vec2) {}

  /// Called when a push cannot be satisfied.
  fn on_squish(&mut self, _collision: &Collision) {}
}

impl<A: Actor + ?Sized> Actor for &mut A {
  fn hitbox(&self) -> Rect {
    (**self).hitbox()
  }

  fn translate(&mut self, offset: IVec2) {
    (**self).translate(offset)
  }

  fn is_collidable(&self) -> bool {
    (**self).is_collidable()
  }

  fn set_collidable(&mut self, collidable: bool) {
    (**self).set_collidable(collidable)
  }

  fn allows_pushing(&self) -> bool {
    (**self).allows_pushing()
  }

  fn treats_naive(&self) -> bool {
    (**self).treats_naive()
  }

  fn is_riding(&self, solid: &SolidShape) -> bool {
    (**self).is_riding(solid)
  }

  fn set_lift_speed(&mut self, lift_speed: Vec2) {
    (**self).set_lift_speed(lift_speed)
  }

  fn on_squish(&mut self, collision: &Collision) {
    (**self).on_squish(collision)
  }
}

/// Exempts one actor from squish reports on one axis and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquishExemption {
  /// Index of the actor in the slice handed to the solver.
  pub actor: usize,
  pub axis: Axis,
  /// Sign of the move the exemption applies to.
  pub direction: i32,
}

impl SquishExemption {
  #[inline]
  pub fn covers(&self, actor: usize, axis: Axis, delta: i32) -> bool {
    self.actor == actor && self.axis == axis && self.direction.signum() == delta.signum()
  }
}

/// What a single solid move did to the actors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveReport {
  /// Actors pushed out of the solid, by index.
  pub pushed: Vec<usize>,
  /// Riders carried along, by index.
  pub carried: Vec<usize>,
  /// Actors whose push could not be satisfied.
  pub squished: Vec<(usize, Collision)>,
}

impl MoveReport {
  pub fn is_empty(&self) -> bool {
    self.pushed.is_empty() && self.carried.is_empty() && self.squished.is_empty()
  }

  pub(crate) fn merge(&mut self, other: MoveReport) {
    self.pushed.extend(other.pushed);
    self.carried.extend(other.carried);
    self.squished.extend(other.squished);
  }
}


#[cfg(test)]
mod tests {
  use super::test_support::TestActor;
  use super::*;

  #[test]
  fn exemption_matches_axis_and_direction() {
    let exemption = SquishExemption {
      actor: 2,
      axis: Axis::Vertical,
      direction: 1,
    };
    assert!(exemption.covers(2, Axis::Vertical, 5));
    assert!(!exemption.covers(2, Axis::Vertical, -5));
    assert!(!exemption.covers(2, Axis::Horizontal, 5));
    assert!(!exemption.covers(1, Axis::Vertical, 5));
  }

  #[test]
  fn default_riding_means_standing_on_top() {
    let floor = SolidShape::from_rect(Rect::new(0, 8, 16, 8));
    assert!(TestActor::at(4, 0).is_riding(&floor));
    assert!(!TestActor::at(4, -1).is_riding(&floor));
    assert!(!TestActor::at(16, 0).is_riding(&floor));
  }

  #[test]
  fn mutable_references_forward_to_the_actor() {
    fn nudge<A: Actor>(mut actor: A) {
      actor.translate(IVec2::new(3, 0));
      actor.set_collidable(false);
    }

    let mut actor = TestActor::at(0, 0);
    nudge(&mut actor);
    assert_eq!(actor.position, IVec2::new(3, 0));
    assert!(!actor.collidable);
  }
}
