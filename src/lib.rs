//! Skeleton Sentry - a side-on crypt corridor guarded by skeletons, in Bevy.
//!
//! Skeletons patrol a stretch of floor, chase and strike at the player when
//! they come close, stagger back when hit by the player's sword, collapse
//! after three blows and get back up a few seconds later.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, data loading, system ordering
//! - **Enemies**: The enemy agent state machine and the systems that host it
//! - **Combat**: The player's sword swing and its hitbox
//! - **Player**: Side-on movement and the follow camera
//! - **World**: Level data, map limits, spawning
//! - **UI**: Pause banner and the designer debug overlay

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SkeletonSentryPlugin;

impl Plugin for SkeletonSentryPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Player systems
            .add_plugins(player::PlayerPlugin)
            // Combat systems
            .add_plugins(combat::CombatPlugin)
            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)
            // World systems
            .add_plugins(world::WorldPlugin)
            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
