//! World plugin - level loading, map limits and spawning.

use bevy::prelude::*;

use crate::core::GameState;
use crate::enemies::{spawn_enemy, EnemyLinks, EnemyRegistry, Facing, MapLimits};
use crate::player::{spawn_player, Player, PlayerCamera, PlayerConfig};

use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};
use super::spawning::{
    limits_from_markers, spawn_floor, spawn_light, spawn_map_limit_markers, LevelGeometry,
    MapLimitMarker,
};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<CurrentLevel>()
            .add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(
                Update,
                resolve_map_limits
                    .run_if(in_state(GameState::InGame))
                    .run_if(not(resource_exists::<MapLimits>)),
            )
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    asset_server: Res<AssetServer>,
    enemy_registry: Res<EnemyRegistry>,
    player_config: Res<PlayerConfig>,
) {
    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    info!("Building level: {}", level.name);

    let lighting = &level.lighting;
    commands.insert_resource(AmbientLight {
        color: Color::srgb(
            lighting.ambient_color.0,
            lighting.ambient_color.1,
            lighting.ambient_color.2,
        ),
        brightness: lighting.ambient_brightness,
    });
    for &(x, y, intensity) in &lighting.torches {
        spawn_light(&mut commands, Vec3::new(x, y, 1.5), intensity);
    }

    spawn_floor(&mut commands, &mut meshes, &mut materials, level);
    spawn_map_limit_markers(&mut commands, level);

    let player_pos = Vec3::new(level.player_spawn.0, level.player_spawn.1, 0.0);
    let (player, weapon_hitbox) =
        spawn_player(&mut commands, player_pos, Facing::Right, &player_config);

    let links = EnemyLinks {
        player,
        weapon_hitbox,
    };
    let spawned = level
        .enemies
        .iter()
        .filter_map(|spawn| {
            spawn_enemy(
                &mut commands,
                &asset_server,
                &enemy_registry,
                &spawn.to_spawn(),
                links,
            )
        })
        .count();

    info!("Spawned {} of {} enemies", spawned, level.enemies.len());
}

/// Read the map limits from the level's markers once they exist.
pub fn resolve_map_limits(
    mut commands: Commands,
    markers: Query<(&MapLimitMarker, &GlobalTransform)>,
) {
    let Some(limits) = limits_from_markers(
        markers
            .iter()
            .map(|(marker, transform)| (marker, transform.translation().x)),
    ) else {
        return;
    };

    info!("Map limits: {:.1} to {:.1}", limits.left, limits.right);
    commands.insert_resource(limits);
}

/// Clean up level entities when leaving InGame state.
pub fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, With<LevelGeometry>>,
    actor_query: Query<Entity, Or<(With<Player>, With<PlayerCamera>, With<crate::enemies::Enemy>)>>,
) {
    for entity in level_query.iter().chain(actor_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<MapLimits>();
}
