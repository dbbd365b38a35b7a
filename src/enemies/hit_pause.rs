//! Hit-pause: a brief freeze of a single enemy when a sword blow lands.
//!
//! The freeze is scoped to the enemy that was hit. Other enemies and the
//! global clock keep running.

use bevy::prelude::*;

use super::animation::AnimationLink;
use super::components::{Enemy, PendingOutput};

/// Remaining real time of an enemy's hit-pause.
#[derive(Component)]
pub struct HitPause(pub Timer);

/// Start hit-pauses requested by the last agent tick.
pub fn apply_hit_pause(
    mut commands: Commands,
    mut query: Query<(Entity, &mut PendingOutput, Option<&AnimationLink>), With<Enemy>>,
    mut animation_players: Query<&mut AnimationPlayer>,
) {
    for (entity, mut pending, link) in query.iter_mut() {
        let Some(duration) = pending.0.hit_pause.take() else {
            continue;
        };

        commands
            .entity(entity)
            .insert(HitPause(Timer::from_seconds(duration, TimerMode::Once)));

        if let Some(mut player) = link.and_then(|l| animation_players.get_mut(l.0).ok()) {
            player.pause_all();
        }
    }
}

/// End hit-pauses. Ticks on the real clock.
pub fn tick_hit_pause(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    mut query: Query<(Entity, &mut HitPause, Option<&AnimationLink>)>,
    mut animation_players: Query<&mut AnimationPlayer>,
) {
    for (entity, mut pause, link) in query.iter_mut() {
        pause.0.tick(real_time.delta());

        if pause.0.finished() {
            commands.entity(entity).remove::<HitPause>();
            if let Some(mut player) = link.and_then(|l| animation_players.get_mut(l.0).ok()) {
                player.resume_all();
            }
        }
    }
}
