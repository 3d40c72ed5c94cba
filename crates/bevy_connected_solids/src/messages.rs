//! Messages exchanged with the connected solids systems.

use bevy::math::Vec2;
use bevy::prelude::Entity;

use crate::solver::Collision;

/// Request to move a solid by a fractional amount this frame.
#[derive(bevy::prelude::Message, Clone, Debug)]
pub struct MoveSolid {
  /// Entity carrying the [`CompositeBody`](crate::body::CompositeBody).
  pub solid: Entity,
  /// Level-space displacement; fractions accumulate in
  /// [`MoveRemainder`](crate::components::MoveRemainder).
  pub amount: Vec2,
  /// Speed handed to every pushed or carried actor.
  pub lift_speed: Vec2,
  /// Stop in front of other solids instead of passing through them.
  pub stop_at_solids: bool,
}

impl MoveSolid {
  pub fn new(solid: Entity, amount: Vec2) -> Self {
    Self {
      solid,
      amount,
      lift_speed: Vec2::ZERO,
      stop_at_solids: false,
    }
  }

  pub fn with_lift_speed(mut self, lift_speed: Vec2) -> Self {
    self.lift_speed = lift_speed;
    self
  }

  pub fn stopping_at_solids(mut self) -> Self {
    self.stop_at_solids = true;
    self
  }
}

/// Sent once a solid has absorbed its extension pieces.
#[derive(bevy::prelude::Message, Clone, Debug)]
pub struct SolidGrouped {
  pub solid: Entity,
  /// Number of pieces absorbed.
  pub pieces: usize,
}

/// Sent when a moving solid could not push an actor out of the way.
#[derive(bevy::prelude::Message, Clone, Debug)]
pub struct ActorSquished {
  pub actor: Entity,
  pub solid: Entity,
  pub collision: Collision,
}

/// Sent when a solid moving with `stop_at_solids` was blocked.
#[derive(bevy::prelude::Message, Clone, Debug)]
pub struct SolidBlocked {
  pub solid: Entity,
  /// Units covered on the blocked axis.
  pub moved: i32,
  pub axis: crate::coords::Axis,
}
