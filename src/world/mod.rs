//! World module - levels, map limits and spawning.

mod data;
mod plugin;
mod spawning;

pub use data::{CurrentLevel, EnemySpawnDef, LevelDefinition, LevelRegistry, LEVEL_DATA_DIR};
pub use plugin::{cleanup_level, resolve_map_limits, setup_level, WorldPlugin};
pub use spawning::{limits_from_markers, LevelGeometry, MapLimitMarker};
