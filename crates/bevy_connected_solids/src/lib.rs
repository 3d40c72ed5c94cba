//! Connected Solids - composite platformer solids for Bevy.
//!
//! A level places seed solids and loose extension pieces. When a solid is
//! spawned it absorbs every piece connected to it along an edge and becomes a
//! single rigid [`CompositeBody`]. Grouped bodies can be auto-tiled from a
//! 3x3 edge swatch and a 2x2 inner-corner swatch, and move kinematically,
//! pushing actors out of the way and carrying the ones riding on top.
//!
//! The core (`body`, `tiling`, `solver`) is plain data and works without an
//! `App`; the plugin wires it into Bevy's ECS.
//!
//! # Example
//! ```ignore
//! app.add_plugins(ConnectedSolidsPlugin::default());
//!
//! fn setup(mut commands: Commands) {
//!     let level = LevelSolids::load("assets/level.toml").unwrap_or_default();
//!     commands.queue(SpawnLevelSolids::new(level));
//! }
//!
//! fn drive(mut moves: MessageWriter<MoveSolid>, platform: Single<Entity, With<CompositeBody>>) {
//!     moves.write(MoveSolid::new(*platform, Vec2::new(0.5, 0.0)));
//! }
//! ```

use bevy::prelude::*;

pub mod body;
pub mod components;
pub mod config;
pub mod coords;
pub mod level;
pub mod messages;
pub mod primitives;
pub mod schedule;
pub mod solver;
pub mod systems;
pub mod tiling;

pub use body::{CompositeBody, ExtensionPiece, GroupState, OccupancyGrids, PieceState, SolidShape};
pub use components::{MoveRemainder, NoSquish, RidePolicy, SolidActor};
pub use config::{ConnectedSolidsConfig, LoadError};
pub use coords::{Axis, TILE_SIZE};
pub use level::{LevelSolids, SpawnLevelSolids};
pub use messages::{ActorSquished, MoveSolid, SolidBlocked, SolidGrouped};
pub use primitives::{Grid, Rect};
pub use schedule::ConnectedSolidsSet;
pub use solver::{Actor, Collision, MoveReport, SquishExemption, move_actor_exact};
pub use tiling::{EdgeSwatch, InnerCornerSwatch, PlacedTile, Swatch, TileKind, TileTopology};

/// Plugin for connected solids.
///
/// Registers the configuration resource, the messages and the systems of the
/// three [`ConnectedSolidsSet`] phases in [`Update`]. A configuration already
/// present in the app is kept.
#[derive(Default)]
pub struct ConnectedSolidsPlugin {
  pub config: ConnectedSolidsConfig,
}

impl ConnectedSolidsPlugin {
  pub fn new(config: ConnectedSolidsConfig) -> Self {
    Self { config }
  }
}

impl Plugin for ConnectedSolidsPlugin {
  fn build(&self, app: &mut App) {
    if !app.world().contains_resource::<ConnectedSolidsConfig>() {
      app.insert_resource(self.config.clone());
    }

    app
      .add_message::<MoveSolid>()
      .add_message::<SolidGrouped>()
      .add_message::<ActorSquished>()
      .add_message::<SolidBlocked>();

    app.configure_sets(
      Update,
      (
        ConnectedSolidsSet::Group,
        ConnectedSolidsSet::Move,
        ConnectedSolidsSet::Sync,
      )
        .chain(),
    );

    app.add_systems(
      Update,
      systems::group_new_solids.in_set(ConnectedSolidsSet::Group),
    );
    app.add_systems(
      Update,
      systems::apply_solid_moves.in_set(ConnectedSolidsSet::Move),
    );
    app.add_systems(
      Update,
      (systems::sync_solid_transforms, systems::sync_actor_transforms)
        .run_if(systems::transform_sync_enabled)
        .in_set(ConnectedSolidsSet::Sync),
    );
  }
}
