//! ECS components for actors and solid movement state.

use bevy::math::{IVec2, Vec2};
use bevy::prelude::{Component, Entity};
use serde::Deserialize;

use crate::body::SolidShape;
use crate::coords::Axis;
use crate::primitives::Rect;
use crate::solver::{Actor, Collision};

/// How an actor decides whether it rides a solid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RidePolicy {
  /// Rides a solid it stands on.
  #[default]
  Standing,
  /// Also rides a solid it clings to from either side.
  StandingOrClinging,
  /// Never carried; can still be pushed.
  Never,
}

/// A dynamic body that moving solids push and carry.
#[derive(Component, Clone, Debug)]
pub struct SolidActor {
  /// Level-space position.
  pub position: IVec2,
  /// Hitbox relative to `position`.
  pub hitbox: Rect,
  pub collidable: bool,
  pub allow_pushing: bool,
  /// Skip rigid displacement; riders are translated without collision.
  pub treat_naive: bool,
  pub ride: RidePolicy,
  /// Speed of the last solid that moved this actor.
  pub lift_speed: Vec2,
  /// The most recent squish, kept until the host clears it.
  pub last_squish: Option<Collision>,
}

impl SolidActor {
  /// Creates an actor whose hitbox covers `size` units from `position`.
  pub fn new(position: IVec2, size: IVec2) -> Self {
    Self {
      position,
      hitbox: Rect::from_min_size(IVec2::ZERO, size),
      collidable: true,
      allow_pushing: true,
      treat_naive: false,
      ride: RidePolicy::Standing,
      lift_speed: Vec2::ZERO,
      last_squish: None,
    }
  }

  pub fn with_hitbox(mut self, hitbox: Rect) -> Self {
    self.hitbox = hitbox;
    self
  }

  pub fn with_ride(mut self, ride: RidePolicy) -> Self {
    self.ride = ride;
    self
  }

  pub fn naive(mut self) -> Self {
    self.treat_naive = true;
    self
  }

  pub fn unpushable(mut self) -> Self {
    self.allow_pushing = false;
    self
  }
}

impl Actor for SolidActor {
  fn hitbox(&self) -> Rect {
    self.hitbox.translated(self.position)
  }

  fn translate(&mut self, offset: IVec2) {
    self.position += offset;
  }

  fn is_collidable(&self) -> bool {
    self.collidable
  }

  fn set_collidable(&mut self, collidable: bool) {
    self.collidable = collidable;
  }

  fn allows_pushing(&self) -> bool {
    self.allow_pushing
  }

  fn treats_naive(&self) -> bool {
    self.treat_naive
  }

  fn is_riding(&self, solid: &SolidShape) -> bool {
    let hitbox = Actor::hitbox(self);
    let standing = solid.overlaps(&hitbox.translated(IVec2::Y));
    match self.ride {
      RidePolicy::Standing => standing,
      RidePolicy::StandingOrClinging => {
        standing
          || solid.overlaps(&hitbox.translated(IVec2::X))
          || solid.overlaps(&hitbox.translated(IVec2::NEG_X))
      }
      RidePolicy::Never => false,
    }
  }

  fn set_lift_speed(&mut self, lift_speed: Vec2) {
    self.lift_speed = lift_speed;
  }

  fn on_squish(&mut self, collision: &Collision) {
    self.last_squish = Some(*collision);
  }
}

/// Sub-unit motion a solid has not applied yet.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveRemainder(pub Vec2);

impl MoveRemainder {
  /// Adds `amount` and takes out the whole units, rounded to nearest.
  ///
  /// Halves round away from zero, so an exact 0.5 yields one unit rather
  /// than the zero a round-half-to-even accumulator would give.
  pub fn take(&mut self, amount: Vec2) -> IVec2 {
    self.0 += amount;
    let whole = self.0.round();
    self.0 -= whole;
    whole.as_ivec2()
  }

  /// Drops the pending motion on one axis.
  pub fn clear(&mut self, axis: Axis) {
    match axis {
      Axis::Horizontal => self.0.x = 0.0,
      Axis::Vertical => self.0.y = 0.0,
    }
  }
}

/// Placed on a solid: never report a squish of `actor` on `axis` in
/// `direction`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoSquish {
  pub actor: Entity,
  pub axis: Axis,
  pub direction: i32,
}
