use std::path::Path;

use skeleton_sentry::enemies::data::{EnemyRegistry, ENEMY_DATA_DIR};
use skeleton_sentry::world::{LevelRegistry, LEVEL_DATA_DIR};

#[test]
fn shipped_enemy_definitions_load() {
    let mut registry = EnemyRegistry::default();
    let loaded = registry
        .load_dir(Path::new(ENEMY_DATA_DIR))
        .expect("enemy data directory exists");

    assert_eq!(loaded, registry.definitions.len());
    let skeleton = registry.get("skeleton").expect("skeleton is defined");
    assert_eq!(skeleton.tuning.max_health, 3);
    assert_eq!(skeleton.sounds.hurt.len(), 3);
}

#[test]
fn shipped_levels_load_and_reference_known_enemies() {
    let mut enemies = EnemyRegistry::default();
    enemies
        .load_dir(Path::new(ENEMY_DATA_DIR))
        .expect("enemy data directory exists");

    let mut levels = LevelRegistry::default();
    levels
        .load_dir(Path::new(LEVEL_DATA_DIR))
        .expect("level data directory exists");

    let crypt = levels.get("crypt").expect("crypt level is defined");
    assert!(!crypt.enemies.is_empty());
    for spawn in &crypt.enemies {
        assert!(
            enemies.get(&spawn.enemy_type).is_some(),
            "unknown enemy type {}",
            spawn.enemy_type
        );
    }
}
