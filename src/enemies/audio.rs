//! Enemy voices.
//!
//! Each enemy owns a single voice: playing a cue replaces whatever it was
//! saying, and a stop request silences it.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioInstance, AudioSource, AudioTween};
use rand::seq::SliceRandom;
use rand::Rng;

use super::agent::{AudioCue, AudioRequest};
use super::components::{Enemy, EnemyType, PendingOutput};
use super::data::{EnemyRegistry, SoundConfig};

/// Loaded clips for one enemy type.
#[derive(Clone, Default)]
pub struct EnemySoundSet {
    pub hurt: Vec<Handle<AudioSource>>,
    pub death: Handle<AudioSource>,
    pub attack: Handle<AudioSource>,
    pub wake_laugh: Handle<AudioSource>,
}

impl EnemySoundSet {
    pub fn load(asset_server: &AssetServer, config: &SoundConfig) -> Self {
        Self {
            hurt: config
                .hurt
                .iter()
                .map(|path| asset_server.load(path.clone()))
                .collect(),
            death: asset_server.load(config.death.clone()),
            attack: asset_server.load(config.attack.clone()),
            wake_laugh: asset_server.load(config.wake_laugh.clone()),
        }
    }

    /// Clip for a cue. Hurt picks one of its variants at random.
    pub fn clip<R: Rng + ?Sized>(&self, cue: AudioCue, rng: &mut R) -> Option<&Handle<AudioSource>> {
        match cue {
            AudioCue::Hurt => self.hurt.choose(rng),
            AudioCue::Death => Some(&self.death),
            AudioCue::Attack => Some(&self.attack),
            AudioCue::WakeLaugh => Some(&self.wake_laugh),
        }
    }
}

/// Sound sets keyed by enemy type.
#[derive(Resource, Default)]
pub struct EnemySounds {
    pub sets: HashMap<String, EnemySoundSet>,
}

/// The clip an enemy is currently voicing.
#[derive(Component, Default)]
pub struct EnemyVoice(pub Option<Handle<AudioInstance>>);

/// Load the clips of every registered enemy type.
pub fn load_enemy_sounds(
    asset_server: Res<AssetServer>,
    registry: Res<EnemyRegistry>,
    mut sounds: ResMut<EnemySounds>,
) {
    for (enemy_type, definition) in &registry.definitions {
        sounds.sets.insert(
            enemy_type.clone(),
            EnemySoundSet::load(&asset_server, &definition.sounds),
        );
    }
    debug!("Loaded sounds for {} enemy types", sounds.sets.len());
}

fn silence(voice: &mut EnemyVoice, instances: &mut Assets<AudioInstance>) {
    if let Some(handle) = voice.0.take() {
        if let Some(instance) = instances.get_mut(&handle) {
            instance.stop(AudioTween::default());
        }
    }
}

/// Play and stop enemy voices as the agents request.
pub fn apply_audio_requests(
    audio: Res<Audio>,
    sounds: Res<EnemySounds>,
    mut instances: ResMut<Assets<AudioInstance>>,
    mut query: Query<(&EnemyType, &mut EnemyVoice, &mut PendingOutput), With<Enemy>>,
) {
    let mut rng = rand::thread_rng();

    for (enemy_type, mut voice, mut pending) in query.iter_mut() {
        for request in pending.0.audio.drain(..) {
            let (cue, offset) = match request {
                AudioRequest::Stop => {
                    silence(&mut voice, &mut instances);
                    continue;
                }
                AudioRequest::Play(cue) => (cue, 0.0),
                AudioRequest::PlayFrom(cue, offset) => (cue, offset),
            };

            let Some(clip) = sounds
                .sets
                .get(&enemy_type.0)
                .and_then(|set| set.clip(cue, &mut rng))
            else {
                warn!("No {:?} sound for enemy type {}", cue, enemy_type.0);
                continue;
            };

            silence(&mut voice, &mut instances);
            let instance = audio
                .play(clip.clone())
                .start_from(f64::from(offset))
                .handle();
            voice.0 = Some(instance);
        }
    }
}
