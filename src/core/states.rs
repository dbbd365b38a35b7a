//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Enemy behavior and
//! player input only run while the game is in `InGame` and not paused.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while data files are read
/// - Enter `InGame` once loading completes
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Simulation running
    #[default]
    Running,
    /// Simulation frozen, world still visible
    Paused,
}

/// Per-frame ordering of gameplay systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Player input and movement
    Input,
    /// Weapon swing timing
    Combat,
    /// Enemy decision making
    EnemyThink,
    /// Applying enemy decisions to physics, animation and audio
    EnemyApply,
    /// Overlays and other read-only presentation
    Presentation,
}
