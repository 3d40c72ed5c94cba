use super::guard::{ForcedCollidable, Suspended};
use super::{Actor, MoveReport, SquishExemption, move_actor_exact};
use crate::body::{CompositeBody, SolidShape};
use crate::coords::Axis;
use crate::primitives::Rect;

/// Outcome of [`CompositeBody::move_collide_solids`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollideMove {
  /// Units actually moved.
  pub moved: i32,
  /// Whether another solid stopped the body short.
  pub blocked: bool,
  pub report: MoveReport,
}

impl CompositeBody {
  /// Moves the body by exactly `delta` units along `axis`, pushing and carrying
  /// `actors`.
  ///
  /// `obstacles` are the other collidable solids of the level; actors are
  /// never moved into them. Pushing wins over carrying: an actor that the body
  /// runs into is only pushed, even if it was riding. An actor whose push
  /// cannot be satisfied gets [`Actor::on_squish`] unless `exemption` covers it.
  pub fn move_exact<A: Actor>(
    &mut self,
    axis: Axis,
    delta: i32,
    actors: &mut [A],
    obstacles: &[SolidShape],
    exemption: Option<SquishExemption>,
  ) -> MoveReport {
    let mut report = MoveReport::default();
    if delta == 0 {
      return report;
    }

    let before = self.shape();
    let riders: Vec<bool> = actors.iter().map(|a| a.is_riding(&before)).collect();

    let offset = axis.along(delta);
    self.position += offset;
    for decoration in &mut self.decorations {
      decoration.position += offset;
    }

    if !self.collidable {
      return report;
    }

    let rects: Vec<Rect> = self.world_rects().collect();
    let mut carry_solids: Option<Vec<SolidShape>> = None;

    for (index, actor) in actors.iter_mut().enumerate() {
      if !actor.allows_pushing() {
        continue;
      }
      let mut actor = ForcedCollidable::new(actor);

      let hitbox = actor.hitbox();
      let overlapping = !actor.treats_naive() && rects.iter().any(|r| r.intersects(&hitbox));

      if overlapping {
        // `obstacles` never holds this body; the flag is only cleared for the
        // duration of the push.
        let _suspended = Suspended::new(&mut self.collidable, false);
        for rect in &rects {
          let hitbox = actor.hitbox();
          if !rect.intersects(&hitbox) {
            continue;
          }
          let amount = rect.leading_edge(axis, delta) - hitbox.trailing_edge(axis, delta);
          let Err(collision) = move_actor_exact(&mut *actor, axis, amount, obstacles) else {
            continue;
          };
          if exemption.is_some_and(|e| e.covers(index, axis, delta)) {
            log::trace!("actor {} exempt from squish: {}", index, collision);
          } else {
            log::debug!("actor {} squished: {}", index, collision);
            actor.on_squish(&collision);
            report.squished.push((index, collision));
          }
          break;
        }
        actor.set_lift_speed(self.lift_speed);
        report.pushed.push(index);
      } else if riders[index] {
        if actor.treats_naive() {
          actor.translate(offset);
        } else {
          let solids = carry_solids.get_or_insert_with(|| {
            let mut solids = obstacles.to_vec();
            solids.push(SolidShape::new(rects.clone()));
            solids
          });
          // Riders are never squished by a carry.
          let _ = move_actor_exact(&mut *actor, axis, delta, solids);
        }
        actor.set_lift_speed(self.lift_speed);
        report.carried.push(index);
      }
    }

    log::trace!(
      "solid moved {:?} by {}: {} pushed, {} carried",
      axis,
      delta,
      report.pushed.len(),
      report.carried.len()
    );
    report
  }

  /// Moves the body up to `delta` units, stopping in front of the first
  /// obstacle, then resolves actors for the distance covered.
  pub fn move_collide_solids<A: Actor>(
    &mut self,
    axis: Axis,
    delta: i32,
    actors: &mut [A],
    obstacles: &[SolidShape],
    exemption: Option<SquishExemption>,
  ) -> CollideMove {
    let direction = delta.signum();
    let mut reach = 0;
    let mut blocked = false;

    while reach != delta {
      let next = reach + direction;
      if self.collides_at(axis.along(next), obstacles) {
        blocked = true;
        break;
      }
      reach = next;
    }

    CollideMove {
      moved: reach,
      blocked,
      report: self.move_exact(axis, reach, actors, obstacles, exemption),
    }
  }
}

#[cfg(test)]
mod tests {
  use bevy::math::{IVec2, Vec2};

  use super::*;
  use crate::body::ExtensionPiece;
  use crate::solver::test_support::TestActor;

  fn floor() -> CompositeBody {
    CompositeBody::new(IVec2::new(0, 8), 16, 8, true)
  }

  #[test]
  fn rider_is_carried_by_the_full_move() {
    let mut body = floor();
    body.set_lift_speed(Vec2::new(60.0, 0.0));
    let mut actors = [TestActor::at(4, 0)];

    let report = body.move_exact(Axis::Horizontal, 8, &mut actors, &[], None);

    assert_eq!(actors[0].position, IVec2::new(12, 0));
    assert_eq!(report.carried, vec![0]);
    assert!(report.pushed.is_empty());
    assert_eq!(actors[0].lift_speed, Vec2::new(60.0, 0.0));
  }

  #[test]
  fn stationary_actor_is_pushed_the_minimal_distance() {
    let mut body = CompositeBody::new(IVec2::new(16, 0), 8, 8, true);
    let mut actors = [TestActor::at(4, 0)];

    let report = body.move_exact(Axis::Horizontal, -8, &mut actors, &[], None);

    assert_eq!(body.position(), IVec2::new(8, 0));
    assert_eq!(actors[0].position, IVec2::new(0, 0));
    assert_eq!(report.pushed, vec![0]);
    assert!(report.squished.is_empty());
  }

  #[test]
  fn pushing_wins_over_carrying() {
    // A floor with a wall rising on its left; the actor stands on the floor
    // next to the wall.
    let mut body = CompositeBody::new(IVec2::new(0, 8), 16, 8, true);
    body.discover(&mut [ExtensionPiece::new(IVec2::new(-8, 0), 8, 16, true)]);
    let mut actors = [TestActor::at(2, 0)];

    let report = body.move_exact(Axis::Horizontal, 4, &mut actors, &[], None);

    assert_eq!(actors[0].position, IVec2::new(4, 0));
    assert_eq!(report.pushed, vec![0]);
    assert!(report.carried.is_empty());
  }

  #[test]
  fn push_clears_every_overlapped_rect() {
    // A tall seed with a lower step on its right; the actor overlaps both.
    let mut body = CompositeBody::new(IVec2::ZERO, 8, 16, true);
    body.discover(&mut [ExtensionPiece::new(IVec2::new(8, 8), 8, 8, true)]);
    let mut actors = [TestActor {
      size: IVec2::new(8, 12),
      ..TestActor::at(10, 0)
    }];

    let report = body.move_exact(Axis::Horizontal, 4, &mut actors, &[], None);

    assert_eq!(actors[0].position, IVec2::new(20, 0));
    assert_eq!(report.pushed, vec![0]);
    assert!(report.squished.is_empty());
  }

  #[test]
  fn rising_floor_lifts_its_rider() {
    let mut body = floor();
    let mut actors = [TestActor::at(0, 0)];

    let report = body.move_exact(Axis::Vertical, -4, &mut actors, &[], None);

    assert_eq!(actors[0].position, IVec2::new(0, -4));
    assert_eq!(report.pushed, vec![0]);
  }

  #[test]
  fn push_into_a_wall_squishes() {
    let mut body = CompositeBody::new(IVec2::ZERO, 8, 8, true);
    let wall = SolidShape::from_rect(Rect::new(18, 0, 8, 8));
    let mut actors = [TestActor::at(10, 0)];

    let report = body.move_exact(Axis::Horizontal, 8, &mut actors, &[wall], None);

    assert_eq!(actors[0].position, IVec2::new(10, 0));
    assert_eq!(report.squished.len(), 1);
    let (index, collision) = report.squished[0];
    assert_eq!(index, 0);
    assert_eq!(collision.target, 6);
    assert_eq!(collision.moved, 0);
    assert_eq!(actors[0].squishes, vec![collision]);
  }

  #[test]
  fn exemption_only_covers_its_direction() {
    let wall = SolidShape::from_rect(Rect::new(18, 0, 8, 8));
    let exemption = SquishExemption {
      actor: 0,
      axis: Axis::Horizontal,
      direction: 1,
    };

    let mut body = CompositeBody::new(IVec2::ZERO, 8, 8, true);
    let mut actors = [TestActor::at(10, 0)];
    let report = body.move_exact(
      Axis::Horizontal,
      8,
      &mut actors,
      std::slice::from_ref(&wall),
      Some(exemption),
    );
    assert!(report.squished.is_empty());
    assert!(actors[0].squishes.is_empty());

    let flipped = SquishExemption {
      direction: -1,
      ..exemption
    };
    let mut body = CompositeBody::new(IVec2::ZERO, 8, 8, true);
    let mut actors = [TestActor::at(10, 0)];
    let report = body.move_exact(Axis::Horizontal, 8, &mut actors, &[wall], Some(flipped));
    assert_eq!(report.squished.len(), 1);
  }

  #[test]
  fn collidability_is_restored_after_a_push() {
    let mut body = CompositeBody::new(IVec2::new(16, 0), 8, 8, true);
    let mut actor = TestActor::at(4, 0);
    actor.collidable = false;
    let mut actors = [actor];

    body.move_exact(Axis::Horizontal, -8, &mut actors, &[], None);

    assert_eq!(actors[0].position, IVec2::ZERO);
    assert!(!actors[0].collidable);
    assert!(body.is_collidable());
  }

  #[test]
  fn naive_actors_are_only_translated() {
    let mut body = floor();
    let wall = SolidShape::from_rect(Rect::new(14, -8, 8, 16));
    let mut rider = TestActor::at(4, 0);
    rider.naive = true;
    let mut inside = TestActor::at(20, 8);
    inside.naive = true;
    let mut actors = [rider, inside];

    let report = body.move_exact(Axis::Horizontal, 8, &mut actors, &[wall], None);

    assert_eq!(actors[0].position, IVec2::new(12, 0));
    assert_eq!(actors[1].position, IVec2::new(20, 8));
    assert_eq!(report.carried, vec![0]);
    assert!(report.pushed.is_empty());
  }

  #[test]
  fn carried_rider_stops_at_walls_without_squish() {
    let mut body = floor();
    let wall = SolidShape::from_rect(Rect::new(14, -8, 8, 16));
    let mut actors = [TestActor::at(4, 0)];

    let report = body.move_exact(Axis::Horizontal, 8, &mut actors, &[wall], None);

    assert_eq!(actors[0].position, IVec2::new(6, 0));
    assert!(report.squished.is_empty());
    assert!(actors[0].squishes.is_empty());
  }

  #[test]
  fn unpushable_and_unrelated_actors_stay_put() {
    let mut body = floor();
    let mut rider = TestActor::at(4, 0);
    rider.pushable = false;
    let mut actors = [rider, TestActor::at(100, 100)];

    let report = body.move_exact(Axis::Horizontal, 8, &mut actors, &[], None);

    assert_eq!(actors[0].position, IVec2::new(4, 0));
    assert_eq!(actors[1].position, IVec2::new(100, 100));
    assert!(report.is_empty());
  }

  #[test]
  fn intangible_body_moves_alone() {
    let mut body = floor();
    body.set_collidable(false);
    let mut actors = [TestActor::at(4, 0), TestActor::at(-4, 8)];

    let report = body.move_exact(Axis::Horizontal, -8, &mut actors, &[], None);

    assert_eq!(body.position(), IVec2::new(-8, 8));
    assert_eq!(actors[0].position, IVec2::new(4, 0));
    assert_eq!(actors[1].position, IVec2::new(-4, 8));
    assert!(report.is_empty());
  }

  #[test]
  fn decorations_follow_the_body() {
    let mut body = floor();
    let spike = body.attach_decoration(IVec2::new(0, 0));
    let mut actors: [TestActor; 0] = [];

    body.move_exact(Axis::Vertical, 3, &mut actors, &[], None);
    body.move_exact(Axis::Horizontal, -2, &mut actors, &[], None);

    assert_eq!(body.decoration(spike), Some(IVec2::new(-2, 3)));
  }

  #[test]
  fn collide_move_stops_at_other_solids() {
    let mut body = floor();
    let wall = SolidShape::from_rect(Rect::new(20, 0, 8, 16));
    let mut actors = [TestActor::at(4, 0)];

    let result = body.move_collide_solids(Axis::Horizontal, 10, &mut actors, &[wall], None);

    assert_eq!(result.moved, 4);
    assert!(result.blocked);
    assert_eq!(body.position(), IVec2::new(4, 8));
    assert_eq!(actors[0].position, IVec2::new(8, 0));
    assert_eq!(result.report.carried, vec![0]);
  }

  #[test]
  fn collide_move_without_obstacles_is_exact() {
    let mut body = floor();
    let mut actors: [TestActor; 0] = [];
    let result = body.move_collide_solids(Axis::Vertical, -6, &mut actors, &[], None);
    assert_eq!(result.moved, -6);
    assert!(!result.blocked);
  }
}
