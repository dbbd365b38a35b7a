//! Enemy animation systems.
//!
//! The agent speaks in [`AnimationRequest`]s (walk flag, triggers, forced
//! restarts, direct plays). [`AnimationTrack`] turns those into concrete clip
//! changes and times the one-shot clips; the systems below push the result
//! into the model's `AnimationPlayer` once it has been found in the scene.

use std::time::Duration;

use bevy::animation::{graph::AnimationNodeIndex, AnimationClip, AnimationPlayer, RepeatAnimation};
use bevy::prelude::*;

use super::agent::{AnimationClipId, AnimationRequest, EnemyAgent};
use super::components::{Enemy, EnemyType, PendingOutput};
use super::data::{AnimationConfig, EnemyRegistry};
use super::hit_pause::HitPause;
use crate::core::AttackSoundEvent;

/// Graph node for each clip an enemy can play.
#[derive(Component, Clone, Copy, Debug)]
pub struct EnemyAnimations {
    pub idle: AnimationNodeIndex,
    pub walk: AnimationNodeIndex,
    pub attack: AnimationNodeIndex,
    pub hurt: AnimationNodeIndex,
    pub death: AnimationNodeIndex,
    pub death_idle: AnimationNodeIndex,
}

impl EnemyAnimations {
    pub fn node(&self, clip: AnimationClipId) -> AnimationNodeIndex {
        match clip {
            AnimationClipId::Idle => self.idle,
            AnimationClipId::Walk => self.walk,
            AnimationClipId::Attack => self.attack,
            AnimationClipId::Hurt => self.hurt,
            AnimationClipId::Death => self.death,
            AnimationClipId::DeathIdle => self.death_idle,
        }
    }
}

/// Links an enemy entity to its child AnimationPlayer entity.
#[derive(Component)]
pub struct AnimationLink(pub Entity);

/// Marker for enemies awaiting AnimationPlayer discovery.
#[derive(Component)]
pub struct NeedsAnimationSetup;

/// A clip to start on the animation player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipStart {
    pub clip: AnimationClipId,
    pub looping: bool,
}

/// Which clip an enemy is showing and when its current one-shot ends.
#[derive(Component, Debug)]
pub struct AnimationTrack {
    attack_duration: f32,
    hurt_duration: f32,
    attack_sound_frame: f32,
    walking: bool,
    current: AnimationClipId,
    one_shot: Option<Timer>,
    sound_fired: bool,
}

impl Default for AnimationTrack {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl AnimationTrack {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            attack_duration: config.attack_duration,
            hurt_duration: config.hurt_duration,
            attack_sound_frame: config.attack_sound_frame,
            walking: false,
            current: AnimationClipId::Idle,
            one_shot: None,
            sound_fired: false,
        }
    }

    pub fn current(&self) -> AnimationClipId {
        self.current
    }

    fn locomotion_clip(&self) -> AnimationClipId {
        if self.walking {
            AnimationClipId::Walk
        } else {
            AnimationClipId::Idle
        }
    }

    /// Death clips hold their last frame until something else is played.
    fn holds(clip: AnimationClipId) -> bool {
        matches!(clip, AnimationClipId::Death | AnimationClipId::DeathIdle)
    }

    /// Handle one request, returning the clip to start if the visible clip changes.
    pub fn apply(&mut self, request: AnimationRequest) -> Option<ClipStart> {
        match request {
            AnimationRequest::Walk(walking) => {
                self.walking = walking;
                if self.one_shot.is_some() || Self::holds(self.current) {
                    return None;
                }
                let clip = self.locomotion_clip();
                (clip != self.current).then(|| self.start(clip))
            }
            AnimationRequest::Trigger(clip) => {
                if clip == self.current && self.one_shot.is_some() {
                    return None;
                }
                Some(self.start(clip))
            }
            AnimationRequest::Restart(clip) | AnimationRequest::Play(clip) => Some(self.start(clip)),
        }
    }

    fn start(&mut self, clip: AnimationClipId) -> ClipStart {
        let one_shot = match clip {
            AnimationClipId::Attack => Some(self.attack_duration),
            AnimationClipId::Hurt => Some(self.hurt_duration),
            _ => None,
        };

        self.current = clip;
        self.sound_fired = false;
        self.one_shot = one_shot.map(|secs| Timer::from_seconds(secs, TimerMode::Once));

        ClipStart {
            clip,
            looping: matches!(clip, AnimationClipId::Idle | AnimationClipId::Walk),
        }
    }

    /// Advance the one-shot timer; returns the locomotion clip when it ends.
    pub fn tick(&mut self, delta: Duration) -> Option<ClipStart> {
        let timer = self.one_shot.as_mut()?;
        timer.tick(delta);
        if !timer.finished() {
            return None;
        }

        self.one_shot = None;
        let clip = self.locomotion_clip();
        self.current = clip;
        Some(ClipStart {
            clip,
            looping: true,
        })
    }

    /// True once per attack clip, when it reaches its sound frame.
    pub fn take_attack_sound(&mut self) -> bool {
        if self.current != AnimationClipId::Attack || self.sound_fired {
            return false;
        }
        let Some(timer) = &self.one_shot else {
            return false;
        };

        if timer.fraction() >= self.attack_sound_frame {
            self.sound_fired = true;
            true
        } else {
            false
        }
    }
}

/// Finds AnimationPlayer in scene hierarchy and builds AnimationGraph.
pub fn setup_enemy_animations(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    registry: Res<EnemyRegistry>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    enemy_query: Query<
        (Entity, &EnemyType, &AnimationTrack, &Children),
        (With<NeedsAnimationSetup>, With<Enemy>),
    >,
    children_query: Query<&Children>,
    mut animation_player_query: Query<(Entity, &mut AnimationPlayer)>,
) {
    for (enemy_entity, enemy_type, track, children) in enemy_query.iter() {
        // The scene may not have spawned its hierarchy yet
        let Some(player_entity) =
            find_animation_player_entity(children, &children_query, &animation_player_query)
        else {
            continue;
        };

        let Some(definition) = registry.get(&enemy_type.0) else {
            warn!("No definition found for enemy type: {}", enemy_type.0);
            commands.entity(enemy_entity).remove::<NeedsAnimationSetup>();
            continue;
        };

        let Some(ref anim_config) = definition.animations else {
            commands.entity(enemy_entity).remove::<NeedsAnimationSetup>();
            continue;
        };

        let model_base = definition.model_path.replace("#Scene0", "");
        let (graph, nodes) = build_animation_graph(&asset_server, &model_base, anim_config);
        let graph_handle = graphs.add(graph);

        commands
            .entity(player_entity)
            .insert(AnimationGraphHandle(graph_handle));

        commands
            .entity(enemy_entity)
            .remove::<NeedsAnimationSetup>()
            .insert((
                AnimationLink(player_entity),
                nodes,
            ));

        // Show whatever the agent already asked for before the model loaded
        if let Ok((_, mut player)) = animation_player_query.get_mut(player_entity) {
            let current = track.current();
            play_clip(
                &mut player,
                &nodes,
                ClipStart {
                    clip: current,
                    looping: matches!(current, AnimationClipId::Idle | AnimationClipId::Walk),
                },
            );
        }

        info!("Animation setup complete for enemy: {}", definition.name);
    }
}

/// Recursively search for AnimationPlayer entity in hierarchy.
fn find_animation_player_entity(
    children: &Children,
    children_query: &Query<&Children>,
    animation_player_query: &Query<(Entity, &mut AnimationPlayer)>,
) -> Option<Entity> {
    for &child in children.iter() {
        if animation_player_query.get(child).is_ok() {
            return Some(child);
        }

        if let Ok(grandchildren) = children_query.get(child) {
            if let Some(found) =
                find_animation_player_entity(grandchildren, children_query, animation_player_query)
            {
                return Some(found);
            }
        }
    }
    None
}

/// Build animation graph from config.
fn build_animation_graph(
    asset_server: &AssetServer,
    model_base: &str,
    config: &AnimationConfig,
) -> (AnimationGraph, EnemyAnimations) {
    let mut graph = AnimationGraph::new();
    let root = graph.root;
    let indices = &config.indices;

    let mut add = |index: u32| {
        let clip: Handle<AnimationClip> =
            asset_server.load(format!("{}#Animation{}", model_base, index));
        graph.add_clip(clip, 1.0, root)
    };

    let nodes = EnemyAnimations {
        idle: add(indices.idle),
        walk: add(indices.walk),
        attack: add(indices.attack),
        hurt: add(indices.hurt),
        death: add(indices.death),
        death_idle: add(indices.death_idle.unwrap_or(indices.death)),
    };

    (graph, nodes)
}

fn play_clip(player: &mut AnimationPlayer, nodes: &EnemyAnimations, start: ClipStart) {
    player.stop_all();
    let animation = player.start(nodes.node(start.clip));

    if start.looping {
        animation.set_repeat(RepeatAnimation::Forever);
    } else {
        animation.set_repeat(RepeatAnimation::Never);
    }
}

/// Applies the agent's animation requests.
pub fn apply_animation_requests(
    mut query: Query<
        (
            &mut PendingOutput,
            &mut AnimationTrack,
            Option<&AnimationLink>,
            Option<&EnemyAnimations>,
        ),
        With<Enemy>,
    >,
    mut animation_players: Query<&mut AnimationPlayer>,
) {
    for (mut pending, mut track, link, animations) in query.iter_mut() {
        for request in pending.0.animations.drain(..) {
            let Some(start) = track.apply(request) else {
                continue;
            };

            let (Some(link), Some(animations)) = (link, animations) else {
                continue;
            };
            if let Ok(mut player) = animation_players.get_mut(link.0) {
                play_clip(&mut player, animations, start);
            }
        }
    }
}

/// Returns finished one-shot clips to the locomotion loop.
pub fn tick_one_shots(
    time: Res<Time>,
    mut query: Query<
        (
            &mut AnimationTrack,
            Option<&AnimationLink>,
            Option<&EnemyAnimations>,
        ),
        (With<Enemy>, Without<HitPause>),
    >,
    mut animation_players: Query<&mut AnimationPlayer>,
) {
    for (mut track, link, animations) in query.iter_mut() {
        let Some(start) = track.tick(time.delta()) else {
            continue;
        };

        let (Some(link), Some(animations)) = (link, animations) else {
            continue;
        };
        if let Ok(mut player) = animation_players.get_mut(link.0) {
            play_clip(&mut player, animations, start);
        }
    }
}

/// Fires AttackSoundEvent when an attack clip reaches its sound frame.
pub fn emit_attack_sound_events(
    mut query: Query<(Entity, &mut AnimationTrack), With<Enemy>>,
    mut sound_events: EventWriter<AttackSoundEvent>,
) {
    for (entity, mut track) in query.iter_mut() {
        if track.take_attack_sound() {
            sound_events.send(AttackSoundEvent { enemy: entity });
        }
    }
}

/// Lets the agent voice its attack when the animation event fires.
pub fn forward_attack_sound(
    mut sound_events: EventReader<AttackSoundEvent>,
    mut query: Query<(&mut EnemyAgent, &mut PendingOutput), With<Enemy>>,
) {
    for event in sound_events.read() {
        if let Ok((mut agent, mut pending)) = query.get_mut(event.enemy) {
            agent.attack_sound();
            let requested = agent.take_output();
            pending.0.audio.extend(requested.audio);
        }
    }
}
