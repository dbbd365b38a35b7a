//! Core plugin that sets up game states, events, and system ordering.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame) and the Running/Paused sub-state
/// - Global enemy events
/// - The `GameplaySet` ordering every gameplay plugin slots into
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<EnemyAttackEvent>()
            .add_event::<EnemyHitEvent>()
            .add_event::<EnemyDeathEvent>()
            .add_event::<EnemyReviveEvent>()
            .add_event::<AttackSoundEvent>()

            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Combat,
                    GameplaySet::EnemyThink,
                    GameplaySet::EnemyApply,
                    GameplaySet::Presentation,
                )
                    .chain()
                    .run_if(in_state(PlayState::Running)),
            )

            // Data files are read in Startup, so the first Update can start the game
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))

            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(PlayState::Paused), pause_virtual_time)
            .add_systems(OnExit(PlayState::Paused), resume_virtual_time);
    }
}

/// Leave the loading state once startup loading has run.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Data loaded, entering game");
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
