//! Combat plugin - the player's sword.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles swing input and blade timing.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
