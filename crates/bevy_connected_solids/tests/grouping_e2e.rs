//! E2E tests for group discovery inside a headless app.
//!
//! Spawns level data through `SpawnLevelSolids` and checks that solids absorb
//! their pieces on the first update, exactly once.
//!
//! Run: cargo test -p bevy_connected_solids --test grouping_e2e

use bevy::ecs::message::{MessageCursor, Messages};
use bevy::ecs::system::Command;
use bevy::prelude::*;
use bevy_connected_solids::level::{ExtensionData, SolidData};
use bevy_connected_solids::{
  CompositeBody, ConnectedSolidsPlugin, ExtensionPiece, LevelSolids, Rect, SolidGrouped,
  SpawnLevelSolids,
};

struct TestHarness {
  app: App,
  grouped_cursor: MessageCursor<SolidGrouped>,
}

impl TestHarness {
  fn new() -> Self {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(ConnectedSolidsPlugin::default());
    Self {
      app,
      grouped_cursor: MessageCursor::default(),
    }
  }

  fn spawn_level(&mut self, level: LevelSolids) {
    SpawnLevelSolids::new(level).apply(self.app.world_mut());
  }

  fn bodies(&mut self) -> Vec<CompositeBody> {
    let mut q = self.app.world_mut().query::<&CompositeBody>();
    q.iter(self.app.world()).cloned().collect()
  }

  fn count_pieces(&mut self) -> usize {
    let mut q = self.app.world_mut().query::<&ExtensionPiece>();
    q.iter(self.app.world()).count()
  }

  fn read_grouped(&mut self) -> Vec<usize> {
    let messages = self.app.world().resource::<Messages<SolidGrouped>>();
    self
      .grouped_cursor
      .read(messages)
      .map(|m| m.pieces)
      .collect()
  }
}

fn solid(x: i32, y: i32, width: i32, height: i32) -> SolidData {
  SolidData {
    x,
    y,
    width,
    height,
    collidable: true,
  }
}

fn extension(x: i32, y: i32, width: i32, height: i32, has_collision: bool) -> ExtensionData {
  ExtensionData {
    x,
    y,
    width,
    height,
    has_collision,
  }
}

#[test]
fn seed_absorbs_its_neighbour_on_first_update() {
  let mut harness = TestHarness::new();
  harness.spawn_level(LevelSolids {
    solids: vec![solid(0, 0, 16, 8)],
    extensions: vec![extension(16, 0, 8, 8, true), extension(100, 100, 8, 8, true)],
    actors: vec![],
  });

  harness.app.update();

  let bodies = harness.bodies();
  assert_eq!(bodies.len(), 1);
  let body = &bodies[0];
  assert!(body.is_grouped());
  assert_eq!(body.sub_rects(), &[Rect::new(0, 0, 16, 8), Rect::new(16, 0, 8, 8)]);
  assert_eq!(body.group_min(), IVec2::ZERO);
  assert_eq!(body.group_max(), IVec2::new(24, 8));

  assert_eq!(harness.count_pieces(), 1, "unconnected piece stays in the level");
  assert_eq!(harness.read_grouped(), vec![1]);
}

#[test]
fn shared_piece_joins_only_one_solid() {
  let mut harness = TestHarness::new();
  harness.spawn_level(LevelSolids {
    solids: vec![solid(0, 0, 8, 8), solid(16, 0, 8, 8)],
    extensions: vec![extension(8, 0, 8, 8, true)],
    actors: vec![],
  });

  harness.app.update();

  let total: usize = harness.bodies().iter().map(|b| b.sub_rects().len()).sum();
  assert_eq!(total, 3);
  assert_eq!(harness.count_pieces(), 0);

  let mut grouped = harness.read_grouped();
  grouped.sort();
  assert_eq!(grouped, vec![0, 1]);
}

#[test]
fn grouping_happens_once() {
  let mut harness = TestHarness::new();
  harness.spawn_level(LevelSolids {
    solids: vec![solid(0, 0, 8, 8)],
    extensions: vec![extension(0, 8, 8, 8, false)],
    actors: vec![],
  });
  harness.app.update();
  assert_eq!(harness.read_grouped(), vec![1]);

  // A piece that shows up later is not picked up by the grouped solid.
  harness
    .app
    .world_mut()
    .spawn(ExtensionPiece::new(IVec2::new(8, 0), 8, 8, true));
  harness.app.update();
  harness.app.update();

  let bodies = harness.bodies();
  assert_eq!(bodies[0].all_sub_rects().len(), 2);
  assert_eq!(bodies[0].sub_rects().len(), 1);
  assert_eq!(harness.count_pieces(), 1);
  assert!(harness.read_grouped().is_empty());
}

#[test]
fn grouped_bodies_can_be_auto_tiled() {
  let mut harness = TestHarness::new();
  harness.spawn_level(LevelSolids {
    solids: vec![solid(0, 0, 24, 8)],
    extensions: vec![extension(0, 8, 24, 16, true)],
    actors: vec![],
  });
  harness.app.update();

  let mut q = harness.app.world_mut().query::<&mut CompositeBody>();
  let mut body = q.single_mut(harness.app.world_mut()).expect("one solid");
  let edges = bevy_connected_solids::Swatch::from_fn(|c| c);
  let inner = bevy_connected_solids::Swatch::from_fn(|c| c + UVec2::splat(10));
  let tiles = body.auto_tile(&edges, &inner);

  assert_eq!(tiles.len(), 9);
  let fillers = tiles
    .iter()
    .filter(|t| t.kind == bevy_connected_solids::TileKind::Filler)
    .count();
  assert_eq!(fillers, 1);
}
