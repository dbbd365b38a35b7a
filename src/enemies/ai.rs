//! Enemy AI systems: feed each agent its tick input and route its decisions.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::agent::{AgentEvent, EnemyAgent, HitboxCommand, MapLimits, TickInput, WeaponContact};
use super::components::{Enemy, EnemyLinks, PendingOutput};
use crate::combat::WeaponHitbox;
use crate::core::{EnemyAttackEvent, EnemyDeathEvent, EnemyHitEvent, EnemyReviveEvent};

/// Run one behavior tick for every enemy.
pub fn drive_enemy_agents(
    time: Res<Time>,
    real_time: Res<Time<Real>>,
    limits: Option<Res<MapLimits>>,
    rapier_context: Query<&RapierContext>,
    positions: Query<&GlobalTransform>,
    hitboxes: Query<&WeaponHitbox>,
    mut enemy_query: Query<
        (Entity, &Transform, &EnemyLinks, &mut EnemyAgent, &mut PendingOutput),
        With<Enemy>,
    >,
) {
    // Limits are resolved once the level's markers exist.
    let Some(limits) = limits else {
        return;
    };
    let context = rapier_context.get_single().ok();

    for (entity, transform, links, mut agent, mut pending) in enemy_query.iter_mut() {
        let Ok(player) = positions.get(links.player) else {
            continue;
        };
        let player_position = player.translation().truncate();

        let weapon_contact = hitboxes
            .get(links.weapon_hitbox)
            .ok()
            .filter(|hitbox| hitbox.is_live())
            .filter(|_| {
                context.is_some_and(|c| {
                    c.intersection_pair(entity, links.weapon_hitbox) == Some(true)
                })
            })
            .and_then(|hitbox| positions.get(hitbox.owner).ok())
            .map(|owner| WeaponContact {
                owner_x: owner.translation().x,
            });

        let input = TickInput {
            real_delta: real_time.delta_secs(),
            sim_delta: time.delta_secs(),
            position: transform.translation.truncate(),
            player_position,
            limits: *limits,
            weapon_contact,
        };

        pending.0 = agent.tick(&input);
    }
}

/// Arm or disarm weapon hitboxes as the agents request.
///
/// Several agents can share one hitbox. Within a frame a disarm from any of
/// them wins over an arm from another.
pub fn apply_hitbox_commands(
    mut enemy_query: Query<(&EnemyLinks, &mut PendingOutput), With<Enemy>>,
    mut hitboxes: Query<&mut WeaponHitbox>,
) {
    let mut resolved: HashMap<Entity, HitboxCommand> = HashMap::new();

    for (links, mut pending) in enemy_query.iter_mut() {
        let Some(command) = pending.0.hitbox.take() else {
            continue;
        };
        resolved
            .entry(links.weapon_hitbox)
            .and_modify(|current| {
                if command == HitboxCommand::Disarm {
                    *current = command;
                }
            })
            .or_insert(command);
    }

    for (entity, command) in resolved {
        if let Ok(mut hitbox) = hitboxes.get_mut(entity) {
            hitbox.armed = command == HitboxCommand::Arm;
        }
    }
}

/// Turn agent transitions into game events.
pub fn forward_agent_events(
    mut enemy_query: Query<(Entity, &EnemyAgent, &mut PendingOutput), With<Enemy>>,
    mut attacks: EventWriter<EnemyAttackEvent>,
    mut hits: EventWriter<EnemyHitEvent>,
    mut deaths: EventWriter<EnemyDeathEvent>,
    mut revives: EventWriter<EnemyReviveEvent>,
) {
    for (entity, agent, mut pending) in enemy_query.iter_mut() {
        for event in pending.0.events.drain(..) {
            match event {
                AgentEvent::AttackStarted => {
                    debug!("Enemy {:?} attacks", entity);
                    attacks.send(EnemyAttackEvent { enemy: entity });
                }
                AgentEvent::Hurt { health } => {
                    debug!("Enemy {:?} hurt, {} health left", entity, health);
                    hits.send(EnemyHitEvent {
                        enemy: entity,
                        health,
                    });
                }
                AgentEvent::Died => {
                    info!(
                        "Enemy {:?} collapsed, back up in {:.2}s",
                        entity,
                        agent.tuning().death_cycle()
                    );
                    deaths.send(EnemyDeathEvent { enemy: entity });
                }
                AgentEvent::Revived => {
                    info!("Enemy {:?} got back up", entity);
                    revives.send(EnemyReviveEvent { enemy: entity });
                }
            }
        }
    }
}
