//! Level data for solids, extension pieces and actors.
//!
//! ```toml
//! [[solids]]
//! x = 0
//! y = 8
//! width = 16
//! height = 8
//!
//! [[extensions]]
//! x = 16
//! y = 0
//! width = 8
//! height = 16
//! has_collision = false
//!
//! [[actors]]
//! x = 4
//! y = 0
//! width = 8
//! height = 8
//! ride = "standing_or_clinging"
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::body::{CompositeBody, ExtensionPiece};
use crate::components::{RidePolicy, SolidActor};
use crate::config::{ConnectedSolidsConfig, LoadError, load_toml, parse_toml};

fn yes() -> bool {
  true
}

/// A seed solid.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SolidData {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
  #[serde(default = "yes")]
  pub collidable: bool,
}

/// An extension piece.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ExtensionData {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
  #[serde(default = "yes")]
  pub has_collision: bool,
}

/// A dynamic body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ActorData {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
  #[serde(default = "yes")]
  pub pushable: bool,
  #[serde(default)]
  pub naive: bool,
  #[serde(default)]
  pub ride: RidePolicy,
}

/// Solids, pieces and actors of one level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelSolids {
  pub solids: Vec<SolidData>,
  pub extensions: Vec<ExtensionData>,
  pub actors: Vec<ActorData>,
}

impl LevelSolids {
  pub fn from_toml_str(source: &str) -> Result<Self, LoadError> {
    parse_toml(source)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    load_toml(path.as_ref())
  }
}

impl SolidData {
  pub fn body(&self) -> CompositeBody {
    CompositeBody::new(IVec2::new(self.x, self.y), self.width, self.height, self.collidable)
  }
}

impl ExtensionData {
  pub fn piece(&self) -> ExtensionPiece {
    ExtensionPiece::new(IVec2::new(self.x, self.y), self.width, self.height, self.has_collision)
  }
}

impl ActorData {
  pub fn actor(&self) -> SolidActor {
    let mut actor =
      SolidActor::new(IVec2::new(self.x, self.y), IVec2::new(self.width, self.height))
        .with_ride(self.ride);
    actor.allow_pushing = self.pushable;
    actor.treat_naive = self.naive;
    actor
  }
}

/// Command that spawns a level's pieces, then its solids, then its actors.
///
/// Pieces go first so they already exist when the solids are grouped.
///
/// # Example
/// ```ignore
/// fn setup(mut commands: Commands) {
///     let level = LevelSolids::load("assets/level.toml").unwrap_or_default();
///     commands.queue(SpawnLevelSolids::new(level));
/// }
/// ```
pub struct SpawnLevelSolids {
  level: LevelSolids,
}

impl SpawnLevelSolids {
  pub fn new(level: LevelSolids) -> Self {
    Self { level }
  }
}

impl bevy::ecs::system::Command for SpawnLevelSolids {
  fn apply(self, world: &mut World) {
    let config = world
      .get_resource::<ConnectedSolidsConfig>()
      .cloned()
      .unwrap_or_default();
    let at = |position: IVec2| Transform::from_translation(config.to_world(position).extend(0.0));

    for data in &self.level.extensions {
      world.spawn((data.piece(), at(IVec2::new(data.x, data.y))));
    }
    for data in &self.level.solids {
      world.spawn((data.body(), at(IVec2::new(data.x, data.y))));
    }
    for data in &self.level.actors {
      world.spawn((data.actor(), at(IVec2::new(data.x, data.y))));
    }

    info!(
      "spawned level: {} solids, {} extensions, {} actors",
      self.level.solids.len(),
      self.level.extensions.len(),
      self.level.actors.len()
    );
  }
}
