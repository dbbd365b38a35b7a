//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::{read_ron, ron_files, DataLoadError};
use crate::enemies::{EnemySpawn, Facing};

/// Directory level definitions are read from.
pub const LEVEL_DATA_DIR: &str = "assets/data/levels";

/// One enemy placed in a level.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawnDef {
    /// Enemy definition file stem, e.g. "skeleton"
    pub enemy_type: String,
    pub x: f32,
    #[serde(default = "default_spawn_height")]
    pub y: f32,
    #[serde(default = "default_facing_right")]
    pub facing_right: bool,
}

fn default_spawn_height() -> f32 {
    1.0
}

fn default_facing_right() -> bool {
    true
}

impl EnemySpawnDef {
    pub fn to_spawn(&self) -> EnemySpawn {
        EnemySpawn {
            enemy_type: self.enemy_type.clone(),
            position: Vec2::new(self.x, self.y),
            facing: if self.facing_right {
                Facing::Right
            } else {
                Facing::Left
            },
        }
    }
}

/// Global lighting for a level.
#[derive(Debug, Clone, Deserialize)]
pub struct LightingDef {
    pub ambient_color: (f32, f32, f32),
    pub ambient_brightness: f32,
    /// Point lights along the corridor: (x, y, intensity)
    #[serde(default)]
    pub torches: Vec<(f32, f32, f32)>,
}

impl Default for LightingDef {
    fn default() -> Self {
        Self {
            ambient_color: (0.4, 0.4, 0.5),
            ambient_brightness: 200.0,
            torches: Vec::new(),
        }
    }
}

/// Level definition loaded from a RON file.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// x of the left map-limit marker
    pub limit_left: f32,
    /// x of the right map-limit marker
    pub limit_right: f32,
    /// Extra floor beyond each limit, so nothing falls off the edge
    #[serde(default = "default_floor_margin")]
    pub floor_margin: f32,
    pub player_spawn: (f32, f32),
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
    #[serde(default)]
    pub lighting: LightingDef,
}

fn default_floor_margin() -> f32 {
    4.0
}

impl LevelDefinition {
    /// Check the limits and that every spawn sits between them.
    pub fn validate(&self, path: &Path) -> Result<(), DataLoadError> {
        let invalid = |reason: String| DataLoadError::Invalid {
            path: path.display().to_string(),
            reason,
        };

        if self.limit_left >= self.limit_right {
            return Err(invalid(format!(
                "limit_left ({}) must be less than limit_right ({})",
                self.limit_left, self.limit_right
            )));
        }

        let inside = |x: f32| (self.limit_left..=self.limit_right).contains(&x);
        if !inside(self.player_spawn.0) {
            return Err(invalid(format!(
                "player spawn x {} is outside the map limits",
                self.player_spawn.0
            )));
        }
        for spawn in &self.enemies {
            if !inside(spawn.x) {
                return Err(invalid(format!(
                    "{} spawn x {} is outside the map limits",
                    spawn.enemy_type, spawn.x
                )));
            }
        }
        Ok(())
    }

    /// Total floor length including both margins.
    pub fn floor_width(&self) -> f32 {
        self.limit_right - self.limit_left + 2.0 * self.floor_margin
    }

    pub fn floor_center_x(&self) -> f32 {
        (self.limit_left + self.limit_right) * 0.5
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }

    /// Load every level in `dir`, keyed by file stem.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, DataLoadError> {
        let mut loaded = 0;

        for path in ron_files(dir)? {
            let Some(level_name) = path.file_stem().map(|s| s.to_string_lossy().to_string())
            else {
                continue;
            };

            match read_ron::<LevelDefinition>(&path).and_then(|level| {
                level.validate(&path)?;
                Ok(level)
            }) {
                Ok(level) => {
                    info!("Loaded level: {} ({})", level.name, level_name);
                    self.levels.insert(level_name, level);
                    loaded += 1;
                }
                Err(e) => error!("Skipping level: {}", e),
            }
        }

        Ok(loaded)
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "crypt".to_string(),
        }
    }
}

/// Load all level definitions from the assets/data/levels/ directory.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    match registry.load_dir(Path::new(LEVEL_DATA_DIR)) {
        Ok(count) => info!("Loaded {} level(s)", count),
        Err(e) => warn!("Levels unavailable: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRYPT: &str = r#"(
        name: "Crypt",
        limit_left: -12.0,
        limit_right: 20.0,
        player_spawn: (-8.0, 1.0),
        enemies: [
            (enemy_type: "skeleton", x: 0.0),
            (enemy_type: "skeleton", x: 10.0, facing_right: false),
        ],
    )"#;

    #[test]
    fn parses_level_with_defaults() {
        let level: LevelDefinition = ron::from_str(CRYPT).expect("valid level");

        assert_eq!(level.enemies.len(), 2);
        assert_eq!(level.floor_margin, 4.0);
        assert_eq!(level.floor_width(), 40.0);
        assert_eq!(level.floor_center_x(), 4.0);
        assert!(level.validate(Path::new("crypt.ron")).is_ok());

        let second = level.enemies[1].to_spawn();
        assert_eq!(second.facing, Facing::Left);
        assert_eq!(second.position, Vec2::new(10.0, 1.0));
    }

    #[test]
    fn rejects_inverted_limits() {
        let mut level: LevelDefinition = ron::from_str(CRYPT).expect("valid level");
        level.limit_left = 30.0;

        let err = level.validate(Path::new("crypt.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::Invalid { .. }));
    }

    #[test]
    fn rejects_enemy_outside_limits() {
        let mut level: LevelDefinition = ron::from_str(CRYPT).expect("valid level");
        level.enemies[0].x = 25.0;

        assert!(level.validate(Path::new("crypt.ron")).is_err());
    }
}
