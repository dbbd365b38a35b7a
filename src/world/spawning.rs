//! Entity spawning functions for level construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::LevelDefinition;
use crate::enemies::MapLimits;

/// Marker for all level entities that should be cleaned up.
#[derive(Component)]
pub struct LevelGeometry;

/// One end of the walkable corridor. Its x is the limit.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapLimitMarker {
    Left,
    Right,
}

const FLOOR_DEPTH: f32 = 1.0;
const FLOOR_THICKNESS_Z: f32 = 4.0;

/// Spawn the floor slab spanning both limits and their margins.
pub fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
) {
    let width = level.floor_width();

    // Top surface at y=0, bottom at y=-FLOOR_DEPTH
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(width, FLOOR_DEPTH, FLOOR_THICKNESS_Z))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.23, 0.22),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_xyz(level.floor_center_x(), -FLOOR_DEPTH / 2.0, 0.0),
        Collider::cuboid(width / 2.0, FLOOR_DEPTH / 2.0, FLOOR_THICKNESS_Z / 2.0),
        LevelGeometry,
    ));
}

/// Spawn a point light.
pub fn spawn_light(commands: &mut Commands, position: Vec3, intensity: f32) {
    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 0.75, 0.45),
            intensity,
            range: 12.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(position),
        LevelGeometry,
    ));
}

/// Spawn the two invisible markers bounding the corridor.
pub fn spawn_map_limit_markers(commands: &mut Commands, level: &LevelDefinition) {
    for (marker, x) in [
        (MapLimitMarker::Left, level.limit_left),
        (MapLimitMarker::Right, level.limit_right),
    ] {
        commands.spawn((
            marker,
            Transform::from_xyz(x, 0.0, 0.0),
            GlobalTransform::from_xyz(x, 0.0, 0.0),
            LevelGeometry,
        ));
    }
}

/// Build limits from marker positions. Both markers must be present.
pub fn limits_from_markers<'a>(
    markers: impl IntoIterator<Item = (&'a MapLimitMarker, f32)>,
) -> Option<MapLimits> {
    let mut left = None;
    let mut right = None;

    for (marker, x) in markers {
        match marker {
            MapLimitMarker::Left => left = Some(x),
            MapLimitMarker::Right => right = Some(x),
        }
    }

    Some(MapLimits::new(left?, right?))
}
