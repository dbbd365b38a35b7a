//! Player-related components.

use bevy::prelude::*;

use crate::enemies::Facing;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Which way the player (and so the sword) points along the corridor.
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct PlayerFacing(pub Facing);

/// Marker component for the side-on camera that follows the player.
#[derive(Component)]
pub struct PlayerCamera;

/// Configuration for the side-scrolling player controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Walk speed in units per second
    pub move_speed: f32,
    /// Downward speed applied to keep the player on the floor
    pub fall_speed: f32,
    /// Camera position relative to the player
    pub camera_offset: Vec3,
    /// How quickly the camera catches up, per second
    pub camera_follow_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.5,
            fall_speed: 9.0,
            camera_offset: Vec3::new(0.0, 1.5, 9.0),
            camera_follow_rate: 5.0,
        }
    }
}
