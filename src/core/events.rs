//! Global events used for cross-system communication.
//!
//! Enemy agents report their notable transitions through these events so
//! that overlays and logging stay decoupled from the behavior systems.

use bevy::prelude::*;

/// Sent when an enemy starts an attack.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyAttackEvent {
    pub enemy: Entity,
}

/// Sent when an enemy loses health to a sword hit.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyHitEvent {
    pub enemy: Entity,
    /// Health left after the hit
    pub health: u8,
}

/// Sent when an enemy collapses.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDeathEvent {
    pub enemy: Entity,
}

/// Sent when a collapsed enemy gets back up.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyReviveEvent {
    pub enemy: Entity,
}

/// Sent when an enemy's attack clip reaches its sound frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackSoundEvent {
    pub enemy: Entity,
}
