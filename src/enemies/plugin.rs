//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::animation;
use super::audio::{self, EnemySounds};
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::hit_pause;
use super::motion;
use crate::core::{GameState, GameplaySet};

/// Enemy plugin - handles enemy behavior, physics hand-off, animation and voices.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .init_resource::<EnemySounds>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(OnEnter(GameState::InGame), audio::load_enemy_sounds)
            .add_systems(
                Update,
                ai::drive_enemy_agents.in_set(GameplaySet::EnemyThink),
            )
            // Apply what the agents decided, in the order the agent expects
            .add_systems(
                Update,
                (
                    motion::apply_agent_motion,
                    ai::apply_hitbox_commands,
                    hit_pause::apply_hit_pause,
                    animation::setup_enemy_animations,
                    animation::apply_animation_requests,
                    animation::tick_one_shots,
                    animation::emit_attack_sound_events,
                    animation::forward_attack_sound,
                    audio::apply_audio_requests,
                    ai::forward_agent_events,
                )
                    .chain()
                    .in_set(GameplaySet::EnemyApply),
            )
            // Hit-pauses run on the real clock, even while the game is paused
            .add_systems(
                Update,
                hit_pause::tick_hit_pause.run_if(in_state(GameState::InGame)),
            );
    }
}
