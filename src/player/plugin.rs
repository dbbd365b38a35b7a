//! Player plugin - movement, camera, and player-related systems.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles player movement and the follow camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
