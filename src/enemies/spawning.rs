//! Enemy spawning.
//!
//! Enemies are spawned by the level setup once the player and its weapon
//! hitbox exist, so the links can be handed over at spawn time.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::agent::{EnemyAgent, Facing};
use super::animation::{AnimationTrack, NeedsAnimationSetup};
use super::audio::EnemyVoice;
use super::components::{Enemy, EnemyLinks, EnemyType, PendingOutput};
use super::data::EnemyRegistry;
use super::motion::facing_rotation;

/// Where and how to place one enemy.
#[derive(Clone, Debug)]
pub struct EnemySpawn {
    pub enemy_type: String,
    pub position: Vec2,
    pub facing: Facing,
}

/// Spawn an enemy from its registered definition. Returns `None` for unknown types.
pub fn spawn_enemy(
    commands: &mut Commands,
    asset_server: &AssetServer,
    registry: &EnemyRegistry,
    spawn: &EnemySpawn,
    links: EnemyLinks,
) -> Option<Entity> {
    let Some(definition) = registry.get(&spawn.enemy_type) else {
        warn!("Unknown enemy type: {}", spawn.enemy_type);
        return None;
    };

    let collider_config = definition.collider.clone().unwrap_or_default();
    let track = definition
        .animations
        .as_ref()
        .map(AnimationTrack::new)
        .unwrap_or_default();

    let entity = commands
        .spawn((
            Enemy,
            EnemyType(spawn.enemy_type.clone()),
            EnemyAgent::new(spawn.position, spawn.facing, definition.tuning.clone()),
            PendingOutput::default(),
            links,
            track,
            EnemyVoice::default(),
            NeedsAnimationSetup,
            SceneRoot(asset_server.load(&definition.model_path)),
            Transform::from_translation(spawn.position.extend(0.0))
                .with_rotation(facing_rotation(spawn.facing))
                .with_scale(Vec3::splat(definition.scale)),
        ))
        .insert((
            Collider::capsule_y(collider_config.half_height, collider_config.radius),
            RigidBody::Dynamic,
            Velocity::default(),
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_Z,
        ))
        .id();

    info!(
        "Spawned {} at ({:.1}, {:.1}) facing {:?}",
        definition.name, spawn.position.x, spawn.position.y, spawn.facing
    );

    Some(entity)
}
