//! UI plugin - pause banner and debug overlay.

use bevy::prelude::*;

use super::overlay;
use crate::core::PlayState;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        overlay::setup_overlay_systems(app);

        app.add_systems(OnEnter(PlayState::Paused), setup_pause_banner)
            .add_systems(OnExit(PlayState::Paused), cleanup_pause_banner);
    }
}

/// Marker for pause banner UI entities.
#[derive(Component)]
struct PauseBannerUi;

/// Set up the pause banner.
fn setup_pause_banner(mut commands: Commands) {
    // Semi-transparent overlay
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            PauseBannerUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
            parent.spawn((
                Text::new("Esc to resume"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.65)),
            ));
        });
}

fn cleanup_pause_banner(mut commands: Commands, query: Query<Entity, With<PauseBannerUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
