//! Bevy systems driving discovery, movement and transform sync.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::body::{CompositeBody, ExtensionPiece, SolidShape};
use crate::components::{MoveRemainder, NoSquish, SolidActor};
use crate::config::ConnectedSolidsConfig;
use crate::coords::Axis;
use crate::messages::{ActorSquished, MoveSolid, SolidBlocked, SolidGrouped};
use crate::solver::{MoveReport, SquishExemption};

/// Groups solids spawned since the last run and despawns the pieces they
/// absorb.
///
/// All new solids share one snapshot of the unprocessed pieces, so a piece
/// joins at most one solid even when several are spawned in the same frame.
pub fn group_new_solids(
  mut commands: Commands,
  mut solids: Query<(Entity, &mut CompositeBody), Added<CompositeBody>>,
  mut pieces: Query<(Entity, &mut ExtensionPiece)>,
  mut grouped: MessageWriter<SolidGrouped>,
) {
  if solids.is_empty() {
    return;
  }

  let (entities, mut snapshot): (Vec<Entity>, Vec<ExtensionPiece>) = pieces
    .iter()
    .filter(|(_, piece)| !piece.is_absorbed())
    .map(|(entity, piece)| (entity, piece.clone()))
    .unzip();

  for (solid, mut body) in solids.iter_mut() {
    let absorbed = body.discover(&mut snapshot);
    for &index in &absorbed {
      let entity = entities[index];
      if let Ok((_, mut piece)) = pieces.get_mut(entity) {
        piece.absorb();
      }
      commands.entity(entity).despawn();
    }
    debug!("solid {solid} grouped with {} pieces", absorbed.len());
    grouped.write(SolidGrouped {
      solid,
      pieces: absorbed.len(),
    });
  }
}

/// Applies queued [`MoveSolid`] requests, horizontal axis first.
///
/// Only actors the move pushed, carried or squished are marked changed.
pub fn apply_solid_moves(
  mut requests: MessageReader<MoveSolid>,
  mut solids: Query<(Entity, &mut CompositeBody, &mut MoveRemainder, Option<&NoSquish>)>,
  mut actors: Query<(Entity, &mut SolidActor)>,
  mut squished: MessageWriter<ActorSquished>,
  mut blocked: MessageWriter<SolidBlocked>,
) {
  for request in requests.read() {
    let obstacles: Vec<SolidShape> = solids
      .iter()
      .filter(|(entity, body, ..)| *entity != request.solid && body.is_collidable())
      .map(|(_, body, ..)| body.shape())
      .collect();

    let Ok((_, mut body, mut remainder, no_squish)) = solids.get_mut(request.solid) else {
      warn!("MoveSolid for {} ignored: not a solid", request.solid);
      continue;
    };
    body.set_lift_speed(request.lift_speed);
    let step = remainder.take(request.amount);
    if step == IVec2::ZERO {
      continue;
    }

    let (entities, mut handles): (Vec<Entity>, Vec<Mut<SolidActor>>) = actors.iter_mut().unzip();
    let mut refs: Vec<&mut SolidActor> = handles
      .iter_mut()
      .map(|actor| actor.bypass_change_detection())
      .collect();
    let mut touched = Vec::new();

    for axis in Axis::ALL {
      let delta = axis.component(step);
      if delta == 0 {
        continue;
      }
      let exemption = no_squish.and_then(|no_squish| {
        let actor = entities.iter().position(|&e| e == no_squish.actor)?;
        Some(SquishExemption {
          actor,
          axis: no_squish.axis,
          direction: no_squish.direction,
        })
      });

      let report: MoveReport = if request.stop_at_solids {
        let result = body.move_collide_solids(axis, delta, &mut refs, &obstacles, exemption);
        if result.blocked {
          remainder.clear(axis);
          blocked.write(SolidBlocked {
            solid: request.solid,
            moved: result.moved,
            axis,
          });
        }
        result.report
      } else {
        body.move_exact(axis, delta, &mut refs, &obstacles, exemption)
      };

      touched.extend(report.pushed.iter().chain(&report.carried).copied());
      for (index, collision) in report.squished {
        touched.push(index);
        squished.write(ActorSquished {
          actor: entities[index],
          solid: request.solid,
          collision,
        });
      }
    }

    drop(refs);
    for index in touched {
      handles[index].set_changed();
    }
  }
}

/// Run condition for the transform sync systems.
pub fn transform_sync_enabled(config: Res<ConnectedSolidsConfig>) -> bool {
  config.sync_transforms
}

/// Mirrors solid positions into `Transform`, keeping Z.
pub fn sync_solid_transforms(
  config: Res<ConnectedSolidsConfig>,
  mut solids: Query<(&CompositeBody, &mut Transform), Changed<CompositeBody>>,
) {
  for (body, mut transform) in solids.iter_mut() {
    let world = config.to_world(body.position());
    transform.translation.x = world.x;
    transform.translation.y = world.y;
  }
}

/// Mirrors actor positions into `Transform`, keeping Z.
pub fn sync_actor_transforms(
  config: Res<ConnectedSolidsConfig>,
  mut actors: Query<(&SolidActor, &mut Transform), Changed<SolidActor>>,
) {
  for (actor, mut transform) in actors.iter_mut() {
    let world = config.to_world(actor.position);
    transform.translation.x = world.x;
    transform.translation.y = world.y;
  }
}
