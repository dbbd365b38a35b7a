//! Side-scrolling player movement and camera control.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{CombatState, Weapon, WeaponHitbox};
use crate::core::GameplaySet;
use crate::enemies::{facing_rotation, Facing, MapLimits};

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>()
        .add_systems(Update, player_movement.in_set(GameplaySet::Input))
        .add_systems(Update, camera_follow.in_set(GameplaySet::Presentation));
}

/// Horizontal input in -1.0..=1.0 from A/D or the arrow keys.
fn horizontal_input(keyboard: &ButtonInput<KeyCode>) -> f32 {
    let mut direction = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        direction -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        direction += 1.0;
    }
    direction
}

/// Horizontal step that keeps `x` inside the map limits.
pub fn clamped_step(x: f32, step: f32, limits: &MapLimits) -> f32 {
    limits.clamp_x(x + step) - x
}

/// Walk left and right, turning the sword with the walk direction.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    limits: Option<Res<MapLimits>>,
    mut player_query: Query<
        (
            &mut Transform,
            &mut PlayerFacing,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((mut transform, mut facing, mut controller)) = player_query.get_single_mut() else {
        return;
    };

    let direction = horizontal_input(&keyboard);
    if direction > 0.0 {
        facing.0 = Facing::Right;
    } else if direction < 0.0 {
        facing.0 = Facing::Left;
    }
    transform.rotation = facing_rotation(facing.0);

    let mut step = direction * config.move_speed * time.delta_secs();
    if let Some(limits) = limits {
        step = clamped_step(transform.translation.x, step, &limits);
    }

    controller.translation = Some(Vec3::new(step, -config.fall_speed * time.delta_secs(), 0.0));
}

/// Ease the camera towards its offset from the player.
fn camera_follow(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    let target = player.translation + config.camera_offset;
    let t = (config.camera_follow_rate * time.delta_secs()).min(1.0);
    camera.translation = camera.translation.lerp(target, t);
}

/// Spawn the player, its sword hitbox and the camera.
///
/// Returns the player and hitbox entities.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec3,
    facing: Facing,
    config: &PlayerConfig,
) -> (Entity, Entity) {
    let weapon = Weapon::default();
    let reach = weapon.reach;

    let player = commands
        .spawn((
            Player,
            PlayerFacing(facing),
            CombatState::default(),
            weapon,
            Transform::from_translation(position).with_rotation(facing_rotation(facing)),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    // The blade sits in front of the player along its local forward axis
    let hitbox = commands
        .spawn((
            WeaponHitbox::new(player),
            Collider::cuboid(0.15, 0.4, reach * 0.5),
            Sensor,
            Transform::from_xyz(0.0, 0.2, 0.3 + reach * 0.5),
        ))
        .id();
    commands.entity(player).add_child(hitbox);

    commands.spawn((
        PlayerCamera,
        Camera3d::default(),
        Transform::from_translation(position + config.camera_offset)
            .looking_at(position + Vec3::Y * 0.5, Vec3::Y),
    ));

    (player, hitbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_map_limit() {
        let limits = MapLimits::new(-2.0, 5.0);

        assert_eq!(clamped_step(4.9, 0.5, &limits), 5.0 - 4.9);
        assert_eq!(clamped_step(-1.0, -3.0, &limits), -1.0);
        assert_eq!(clamped_step(0.0, 0.25, &limits), 0.25);
    }
}
