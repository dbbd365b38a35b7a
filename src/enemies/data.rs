//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::tuning::AgentTuning;
use crate::core::{read_ron, ron_files, DataLoadError};

/// Directory enemy definitions are read from.
pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

/// Animation clip indices into the model's glTF animations.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct AnimationIndices {
    pub idle: u32,
    pub walk: u32,
    pub attack: u32,
    pub hurt: u32,
    pub death: u32,
    /// Lying still after the collapse. Falls back to `death`.
    pub death_idle: Option<u32>,
}

/// Animation configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct AnimationConfig {
    pub indices: AnimationIndices,
    pub attack_duration: f32, // seconds
    pub hurt_duration: f32,   // seconds
    /// 0.0-1.0 through the attack clip, when the attack sound fires.
    pub attack_sound_frame: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            indices: AnimationIndices::default(),
            attack_duration: 1.0,
            hurt_duration: 0.4,
            attack_sound_frame: 0.4,
        }
    }
}

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.3,
        }
    }
}

/// Sound file paths for an enemy type.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct SoundConfig {
    /// One is picked at random per hurt.
    pub hurt: Vec<String>,
    pub death: String,
    pub attack: String,
    pub wake_laugh: String,
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub model_path: String,
    pub scale: f32,
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
    #[serde(default)]
    pub animations: Option<AnimationConfig>,
    pub sounds: SoundConfig,
    #[serde(default)]
    pub tuning: AgentTuning,
}

impl EnemyDefinition {
    /// Check the values the behavior relies on.
    pub fn validate(&self, path: &Path) -> Result<(), DataLoadError> {
        let invalid = |reason: &str| DataLoadError::Invalid {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        if self.sounds.hurt.is_empty() {
            return Err(invalid("at least one hurt sound is required"));
        }
        if self.tuning.max_health == 0 {
            return Err(invalid("max_health must be positive"));
        }
        if self.tuning.detection_radius < self.tuning.attack_range {
            return Err(invalid("detection_radius must not be smaller than attack_range"));
        }
        if self.scale <= 0.0 {
            return Err(invalid("scale must be positive"));
        }
        if let Some(animations) = &self.animations {
            if !(0.0..=1.0).contains(&animations.attack_sound_frame) {
                return Err(invalid("attack_sound_frame must be within 0.0-1.0"));
            }
        }
        Ok(())
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Load every definition in `dir`, keyed by file stem.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, DataLoadError> {
        let mut loaded = 0;

        for path in ron_files(dir)? {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match read_ron::<EnemyDefinition>(&path).and_then(|definition| {
                definition.validate(&path)?;
                Ok(definition)
            }) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    self.definitions.insert(enemy_type, definition);
                    loaded += 1;
                }
                Err(e) => error!("Skipping enemy definition: {}", e),
            }
        }

        Ok(loaded)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    match registry.load_dir(Path::new(ENEMY_DATA_DIR)) {
        Ok(count) => info!("Loaded {} enemy definitions", count),
        Err(e) => warn!("Enemy definitions unavailable: {}", e),
    }
}
