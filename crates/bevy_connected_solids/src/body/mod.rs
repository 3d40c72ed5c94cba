//! Composite bodies - rigid solids made of several rectangles.
//!
//! A [`CompositeBody`] starts as a single seed rectangle. When it is activated
//! in the scene, [`CompositeBody::discover`] merges every edge-adjacent
//! [`ExtensionPiece`] into it and derives the occupancy grids used for
//! auto-tiling. From then on the body moves as one unit through the carrying
//! solver.
//!
//! # Frames
//!
//! - **World**: level space, shared with actors and other solids.
//! - **Local**: relative to the body's position. `sub_rects` live here.
//! - **Group**: relative to the group bounds' top-left corner, in which tile
//!   cells are counted. `group_offset` converts group to local.

mod discovery;
mod extension;
mod occupancy;

use bevy::math::{IVec2, Vec2};
use bevy::prelude::Component;
pub use discovery::edge_adjacent;
pub use extension::{ExtensionPiece, PieceState};
pub use occupancy::{OccupancyGrid, OccupancyGrids};

use crate::components::MoveRemainder;
use crate::coords::tiles_in;
use crate::primitives::Rect;
use crate::tiling::TileTopology;

/// Grouping state of a composite body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupState {
  /// Only the seed rectangle is known.
  #[default]
  Pending,
  /// Discovery ran; the rectangle sets and grids are final.
  Grouped,
}

/// A union of world-space rectangles, used for overlap queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolidShape {
  rects: Vec<Rect>,
}

impl SolidShape {
  pub fn new(rects: Vec<Rect>) -> Self {
    Self { rects }
  }

  pub fn from_rect(rect: Rect) -> Self {
    Self { rects: vec![rect] }
  }

  #[inline]
  pub fn rects(&self) -> &[Rect] {
    &self.rects
  }

  /// Returns true if any rectangle of the shape overlaps `rect`.
  #[inline]
  pub fn overlaps(&self, rect: &Rect) -> bool {
    self.rects.iter().any(|r| r.intersects(rect))
  }

  /// Returns the first rectangle of the shape overlapping `rect`.
  #[inline]
  pub fn first_overlap(&self, rect: &Rect) -> Option<Rect> {
    self.rects.iter().copied().find(|r| r.intersects(rect))
  }
}

/// Handle to a decoration attached to a composite body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecorationId(pub u32);

/// Static object that rides along with a body (tiles, sprites, spikes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoration {
  pub id: DecorationId,
  /// World-space position, kept in step with the body.
  pub position: IVec2,
}

/// Rigid solid assembled from a seed rectangle and absorbed extension pieces.
#[derive(Component, Clone, Debug)]
#[require(MoveRemainder)]
pub struct CompositeBody {
  /// Current world position of the seed's top-left corner.
  pub(crate) position: IVec2,
  /// Position at construction; the pen for piece offsets and group bounds.
  pub(crate) origin: IVec2,
  /// Seed rectangle, local frame.
  pub(crate) master: Rect,
  pub(crate) sub_rects: Vec<Rect>,
  pub(crate) all_sub_rects: Vec<Rect>,
  /// World-space group bounds at `origin`.
  pub(crate) group_min: IVec2,
  pub(crate) group_max: IVec2,
  pub(crate) collidable: bool,
  pub(crate) lift_speed: Vec2,
  pub(crate) state: GroupState,
  pub(crate) grids: Option<OccupancyGrids>,
  /// `None` until the first auto-tiling call.
  pub(crate) topology: Option<TileTopology>,
  pub(crate) decorations: Vec<Decoration>,
  next_decoration: u32,
}

impl CompositeBody {
  /// Creates an ungrouped body whose seed covers `width` by `height` units at
  /// `position`.
  pub fn new(position: IVec2, width: i32, height: i32, collidable: bool) -> Self {
    let master = Rect::new(0, 0, width, height);
    Self {
      position,
      origin: position,
      master,
      sub_rects: vec![master],
      all_sub_rects: vec![master],
      group_min: position,
      group_max: position + master.size(),
      collidable,
      lift_speed: Vec2::ZERO,
      state: GroupState::Pending,
      grids: None,
      topology: None,
      decorations: Vec::new(),
      next_decoration: 0,
    }
  }

  #[inline]
  pub fn position(&self) -> IVec2 {
    self.position
  }

  #[inline]
  pub fn origin(&self) -> IVec2 {
    self.origin
  }

  /// The seed rectangle in the local frame.
  #[inline]
  pub fn master_rect(&self) -> Rect {
    self.master
  }

  /// Collidable rectangles (seed first) in the local frame.
  #[inline]
  pub fn sub_rects(&self) -> &[Rect] {
    &self.sub_rects
  }

  /// All rectangles, decoration-only pieces included, in the local frame.
  #[inline]
  pub fn all_sub_rects(&self) -> &[Rect] {
    &self.all_sub_rects
  }

  #[inline]
  pub fn group_min(&self) -> IVec2 {
    self.group_min
  }

  #[inline]
  pub fn group_max(&self) -> IVec2 {
    self.group_max
  }

  /// Group bounds as a rectangle in the world frame at `origin`.
  #[inline]
  pub fn group_bounds(&self) -> Rect {
    Rect::from_min_size(self.group_min, self.group_max - self.group_min)
  }

  /// Offset from the local frame to the group frame's top-left corner.
  #[inline]
  pub fn group_offset(&self) -> IVec2 {
    self.group_min - self.origin
  }

  #[inline]
  pub fn tiles_wide(&self) -> i32 {
    tiles_in(self.group_max.x - self.group_min.x)
  }

  #[inline]
  pub fn tiles_high(&self) -> i32 {
    tiles_in(self.group_max.y - self.group_min.y)
  }

  #[inline]
  pub fn state(&self) -> GroupState {
    self.state
  }

  #[inline]
  pub fn is_grouped(&self) -> bool {
    self.state == GroupState::Grouped
  }

  /// Occupancy grids, available once the body is grouped.
  #[inline]
  pub fn grids(&self) -> Option<&OccupancyGrids> {
    self.grids.as_ref()
  }

  #[inline]
  pub fn is_collidable(&self) -> bool {
    self.collidable
  }

  #[inline]
  pub fn set_collidable(&mut self, collidable: bool) {
    self.collidable = collidable;
  }

  #[inline]
  pub fn lift_speed(&self) -> Vec2 {
    self.lift_speed
  }

  /// Sets the speed handed to every actor this body pushes or carries.
  #[inline]
  pub fn set_lift_speed(&mut self, lift_speed: Vec2) {
    self.lift_speed = lift_speed;
  }

  /// Collidable rectangles in the world frame.
  pub fn world_rects(&self) -> impl Iterator<Item = Rect> + '_ {
    self.sub_rects.iter().map(|r| r.translated(self.position))
  }

  /// Snapshot of the collidable rectangles in the world frame.
  pub fn shape(&self) -> SolidShape {
    SolidShape::new(self.world_rects().collect())
  }

  /// Returns true if the body is collidable and overlaps `rect`.
  pub fn overlaps(&self, rect: &Rect) -> bool {
    self.collidable && self.world_rects().any(|r| r.intersects(rect))
  }

  /// Returns true if the body, shifted by `offset`, would overlap any of the
  /// `obstacles`.
  pub fn collides_at(&self, offset: IVec2, obstacles: &[SolidShape]) -> bool {
    self
      .world_rects()
      .map(|r| r.translated(offset))
      .any(|r| obstacles.iter().any(|o| o.overlaps(&r)))
  }

  /// Attaches a decoration at a world position. It moves with the body from
  /// now on.
  pub fn attach_decoration(&mut self, position: IVec2) -> DecorationId {
    let id = DecorationId(self.next_decoration);
    self.next_decoration += 1;
    self.decorations.push(Decoration { id, position });
    id
  }

  /// Current world position of an attached decoration.
  pub fn decoration(&self, id: DecorationId) -> Option<IVec2> {
    self
      .decorations
      .iter()
      .find(|d| d.id == id)
      .map(|d| d.position)
  }

  #[inline]
  pub fn decorations(&self) -> &[Decoration] {
    &self.decorations
  }

  /// Detaches every decoration and returns them.
  pub fn detach_all(&mut self) -> Vec<Decoration> {
    std::mem::take(&mut self.decorations)
  }
}
