//! Skeleton Sentry - Entry Point
//!
//! Controls:
//! - A/D or arrows: Walk
//! - Left click or J: Swing sword
//! - F3: Toggle enemy debug overlay
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, with Kira handling audio instead of bevy_audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Skeleton Sentry".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(AudioPlugin)
        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Our game plugin
        .add_plugins(skeleton_sentry::SkeletonSentryPlugin)
        .run();
}
