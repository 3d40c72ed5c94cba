use bevy::math::{IVec2, UVec2};

use super::swatch::{EdgeSwatch, InnerCornerSwatch};
use super::{Neighbors, TileKind, classify};
use crate::body::{CompositeBody, DecorationId, OccupancyGrids};
use crate::coords::cell_to_units;

/// Classification of one occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCell {
  /// Cell in the group frame.
  pub cell: IVec2,
  pub kind: TileKind,
  /// Coordinate in the swatch selected by `kind`.
  pub coord: UVec2,
  /// Occupied only by pieces without collision.
  pub background: bool,
}

/// Per-cell classification of a grouped body, computed once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileTopology {
  cells: Vec<TileCell>,
}

impl TileTopology {
  /// Classifies every occupied cell of the full grid, row by row.
  pub fn build(grids: &OccupancyGrids) -> Self {
    let cells = grids
      .all
      .occupied_cells()
      .map(|cell| {
        let (kind, coord) = classify(Neighbors::sample(&grids.all, cell));
        TileCell {
          cell,
          kind,
          coord,
          background: grids.is_background_only(cell),
        }
      })
      .collect();
    Self { cells }
  }

  #[inline]
  pub fn cells(&self) -> &[TileCell] {
    &self.cells
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }
}

/// A tile ready to be spawned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedTile<T> {
  pub cell: IVec2,
  /// Top-left corner in the body's local frame.
  pub position: IVec2,
  pub kind: TileKind,
  pub coord: UVec2,
  pub texture: T,
  /// Drawn behind collidable tiles; depth and tint are up to the caller.
  pub background: bool,
}

impl CompositeBody {
  /// Cached tile classification, if the body was auto-tiled.
  #[inline]
  pub fn topology(&self) -> Option<&TileTopology> {
    self.topology.as_ref()
  }

  /// Auto-tiles the body with the given swatches.
  ///
  /// The first call on a grouped body classifies the occupied cells; later
  /// calls reuse that classification and only look up textures. A body that
  /// has not been discovered yet is tiled from its seed rectangle alone and
  /// stays pending, so a later [`discover`](CompositeBody::discover) still
  /// absorbs its pieces.
  pub fn auto_tile<T: Clone>(
    &mut self,
    edges: &EdgeSwatch<T>,
    inner_corners: &InnerCornerSwatch<T>,
  ) -> Vec<PlacedTile<T>> {
    let pending = !self.is_grouped();
    if pending {
      log::warn!(
        "auto-tiling body at {:?} before discovery: tiles cover the seed only",
        self.origin
      );
      self.build_grids();
    }
    let offset = self.group_offset();

    let Some(grids) = self.grids.as_ref() else {
      return Vec::new();
    };
    let scratch;
    let topology: &TileTopology = if pending {
      scratch = TileTopology::build(grids);
      &scratch
    } else {
      self.topology.get_or_insert_with(|| {
        let topology = TileTopology::build(grids);
        log::debug!("tile topology built: {} cells", topology.len());
        topology
      })
    };

    topology
      .cells
      .iter()
      .filter_map(|tile| {
        let texture = match tile.kind {
          TileKind::InnerCorner => inner_corners.get(tile.coord),
          _ => edges.get(tile.coord),
        };
        texture.cloned().map(|texture| PlacedTile {
          cell: tile.cell,
          position: cell_to_units(tile.cell) + offset,
          kind: tile.kind,
          coord: tile.coord,
          texture,
          background: tile.background,
        })
      })
      .collect()
  }

  /// Auto-tiles the body and attaches every tile as a decoration, so the tiles
  /// follow the body when it moves.
  pub fn attach_tiles<T: Clone>(
    &mut self,
    edges: &EdgeSwatch<T>,
    inner_corners: &InnerCornerSwatch<T>,
  ) -> Vec<(DecorationId, PlacedTile<T>)> {
    let tiles = self.auto_tile(edges, inner_corners);
    tiles
      .into_iter()
      .map(|tile| {
        let id = self.attach_decoration(self.position + tile.position);
        (id, tile)
      })
      .collect()
  }
}
