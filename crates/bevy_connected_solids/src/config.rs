//! Runtime configuration and TOML loading.

use std::io;
use std::path::Path;

use bevy::math::{IVec2, Vec2};
use bevy::prelude::Resource;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::tiling::PlacedTile;

/// Configuration for the connected solids plugin.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// flip_y = false
/// background_depth = -0.5
/// ```
#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectedSolidsConfig {
  /// Mirror integer positions of bodies and actors into their `Transform`.
  pub sync_transforms: bool,
  /// Negate Y when converting level space (Y+ down) to Bevy's world (Y+ up).
  pub flip_y: bool,
  /// Z depth for collidable tiles.
  pub foreground_depth: f32,
  /// Z depth for tiles of decoration-only pieces.
  pub background_depth: f32,
}

impl Default for ConnectedSolidsConfig {
  fn default() -> Self {
    Self {
      sync_transforms: true,
      flip_y: true,
      foreground_depth: 0.0,
      background_depth: -1.0,
    }
  }
}

impl ConnectedSolidsConfig {
  pub fn with_sync_transforms(mut self, sync_transforms: bool) -> Self {
    self.sync_transforms = sync_transforms;
    self
  }

  pub fn with_flip_y(mut self, flip_y: bool) -> Self {
    self.flip_y = flip_y;
    self
  }

  /// Sets the Z depths for collidable and background tiles.
  pub fn with_depths(mut self, foreground: f32, background: f32) -> Self {
    self.foreground_depth = foreground;
    self.background_depth = background;
    self
  }

  /// Converts a level-space position into Bevy world space.
  #[inline]
  pub fn to_world(&self, position: IVec2) -> Vec2 {
    let position = position.as_vec2();
    if self.flip_y {
      Vec2::new(position.x, -position.y)
    } else {
      position
    }
  }

  /// Z depth for a placed tile.
  #[inline]
  pub fn tile_depth<T>(&self, tile: &PlacedTile<T>) -> f32 {
    if tile.background {
      self.background_depth
    } else {
      self.foreground_depth
    }
  }

  pub fn from_toml_str(source: &str) -> Result<Self, LoadError> {
    parse_toml(source)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    load_toml(path.as_ref())
  }
}

/// Error loading a TOML file.
#[derive(Debug)]
pub enum LoadError {
  Io(io::Error),
  Parse(toml::de::Error),
}

impl From<io::Error> for LoadError {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for LoadError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl std::fmt::Display for LoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {}", e),
      Self::Parse(e) => write!(f, "parse error: {}", e),
    }
  }
}

impl std::error::Error for LoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
    }
  }
}

pub(crate) fn parse_toml<T: DeserializeOwned>(source: &str) -> Result<T, LoadError> {
  Ok(toml::from_str(source)?)
}

pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
  let source = std::fs::read_to_string(path)?;
  let parsed = parse_toml(&source)?;
  log::debug!("loaded {}", path.display());
  Ok(parsed)
}
