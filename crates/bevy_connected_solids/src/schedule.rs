//! Schedule labels for connected solids systems.
//!
//! All systems run in [`Update`] within one of the [`ConnectedSolidsSet`]
//! phases, chained in order:
//!
//! ```text
//! Group → Move → Sync
//! ```
//!
//! Hosts send [`MoveSolid`](crate::messages::MoveSolid) before `Move` and read
//! actor positions after it.

use bevy::prelude::*;

/// System sets for the connected solids update loop.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectedSolidsSet {
  /// Group discovery for newly spawned solids.
  Group,
  /// Solid moves, pushing and carrying.
  Move,
  /// Transform mirroring.
  Sync,
}
