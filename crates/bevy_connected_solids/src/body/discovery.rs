//! Group discovery: flood-fills extension pieces into a composite body.
//!
//! Starting from the seed rectangle, every unprocessed piece that touches an
//! already absorbed rectangle along an edge joins the group, then the search
//! continues from that piece. Touching means overlapping once the absorbed
//! rectangle is grown by one unit horizontally, or by one unit vertically;
//! pieces meeting only at a corner stay separate.

use super::extension::ExtensionPiece;
use super::{CompositeBody, GroupState};
use crate::primitives::Rect;

/// Returns true if `candidate` shares an edge with (or overlaps) `from`.
#[inline]
pub fn edge_adjacent(from: &Rect, candidate: &Rect) -> bool {
  from.inflated(1, 0).intersects(candidate) || from.inflated(0, 1).intersects(candidate)
}

impl CompositeBody {
  /// Absorbs every piece reachable from the seed and builds the occupancy
  /// grids.
  ///
  /// Returns the indices of the absorbed pieces in visiting order; the caller
  /// removes those pieces from the scene. Calling this on a body that is
  /// already grouped does nothing and returns an empty list.
  pub fn discover(&mut self, pieces: &mut [ExtensionPiece]) -> Vec<usize> {
    if self.state == GroupState::Grouped {
      log::debug!("discovery skipped: body at {:?} already grouped", self.origin);
      return Vec::new();
    }

    let seed = self.master.translated(self.origin);
    let mut absorbed = Vec::new();
    self.absorb_adjacent(seed, pieces, &mut absorbed);

    self.state = GroupState::Grouped;
    self.build_grids();

    log::debug!(
      "grouped body at {:?}: {} pieces, bounds {:?}..{:?}",
      self.origin,
      absorbed.len(),
      self.group_min,
      self.group_max
    );
    absorbed
  }

  /// Depth-first visit in slice order. Each piece is absorbed at most once, so
  /// the recursion depth is bounded by the number of pieces.
  fn absorb_adjacent(
    &mut self,
    from: Rect,
    pieces: &mut [ExtensionPiece],
    absorbed: &mut Vec<usize>,
  ) {
    for index in 0..pieces.len() {
      if pieces[index].is_absorbed() || !edge_adjacent(&from, &pieces[index].rect()) {
        continue;
      }
      let Some(rect) = pieces[index].absorb() else {
        continue;
      };
      self.fold_piece(rect, pieces[index].has_collision());
      absorbed.push(index);
      self.absorb_adjacent(rect, pieces, absorbed);
    }
  }

  /// Records a world-space piece rectangle and grows the group bounds.
  fn fold_piece(&mut self, rect: Rect, has_collision: bool) {
    let local = rect.translated(-self.origin);
    if has_collision {
      self.sub_rects.push(local);
    }
    self.all_sub_rects.push(local);
    self.group_min = self.group_min.min(rect.min());
    self.group_max = self.group_max.max(rect.max());
  }
}
