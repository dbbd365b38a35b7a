//! Enemy-related components.

use bevy::prelude::*;

use super::agent::AgentOutput;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Entities an enemy interacts with, resolved once when it is spawned.
#[derive(Component, Clone, Copy, Debug)]
pub struct EnemyLinks {
    pub player: Entity,
    pub weapon_hitbox: Entity,
}

/// Requests produced by the last agent tick, drained by the apply systems.
#[derive(Component, Default, Debug)]
pub struct PendingOutput(pub AgentOutput);
