//! Designer debug overlay - per-enemy behavior flags and a short event log.
//!
//! Toggled with F3.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::core::{EnemyAttackEvent, EnemyDeathEvent, EnemyHitEvent, EnemyReviveEvent, GameState, GameplaySet};
use crate::enemies::{Enemy, EnemyAgent, EnemyType};

const EVENT_LOG_LEN: usize = 6;

/// Whether the overlay is shown.
#[derive(Resource, Default)]
pub struct DebugOverlay {
    pub visible: bool,
}

/// Most recent enemy events, newest last.
#[derive(Resource, Default)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, entry: String) {
        if self.entries.len() == EVENT_LOG_LEN {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Marker for the overlay text entity.
#[derive(Component)]
pub struct DebugOverlayText;

/// Setup overlay systems.
pub fn setup_overlay_systems(app: &mut App) {
    app.init_resource::<DebugOverlay>()
        .init_resource::<EventLog>()
        .add_systems(OnEnter(GameState::InGame), spawn_overlay)
        .add_systems(OnExit(GameState::InGame), cleanup_overlay)
        .add_systems(
            Update,
            toggle_debug_overlay.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            (record_enemy_events, update_debug_overlay)
                .chain()
                .in_set(GameplaySet::Presentation),
        );
}

/// One line describing an enemy's state.
pub fn describe_agent(label: &str, agent: &EnemyAgent) -> String {
    let (start, end) = agent.patrol_bounds();
    let flag = |set: bool, name: &'static str| if set { name } else { "-" };

    format!(
        "{label} {:?} hp {}/{} x {:.1} {:?} bounds [{:.1}, {:.1}] speed {:.1} [{} {} {} {}]",
        agent.mode(),
        agent.health(),
        agent.tuning().max_health,
        agent.position().x,
        agent.facing(),
        start,
        end,
        agent.speed(),
        flag(agent.in_range(), "range"),
        flag(agent.is_waiting(), "wait"),
        flag(agent.is_attacking(), "attack"),
        flag(agent.is_dead(), "dead"),
    )
}

fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        Visibility::Hidden,
        DebugOverlayText,
    ));
}

fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut overlay: ResMut<DebugOverlay>,
    mut query: Query<&mut Visibility, With<DebugOverlayText>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    overlay.visible = !overlay.visible;
    for mut visibility in query.iter_mut() {
        *visibility = if overlay.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

fn record_enemy_events(
    mut log: ResMut<EventLog>,
    mut attacks: EventReader<EnemyAttackEvent>,
    mut hits: EventReader<EnemyHitEvent>,
    mut deaths: EventReader<EnemyDeathEvent>,
    mut revives: EventReader<EnemyReviveEvent>,
) {
    for event in attacks.read() {
        log.push(format!("{} attacks", event.enemy));
    }
    for event in hits.read() {
        log.push(format!("{} hit, {} hp left", event.enemy, event.health));
    }
    for event in deaths.read() {
        log.push(format!("{} collapsed", event.enemy));
    }
    for event in revives.read() {
        log.push(format!("{} got back up", event.enemy));
    }
}

/// Rewrite the overlay text while it is visible.
pub fn update_debug_overlay(
    overlay: Res<DebugOverlay>,
    log: Res<EventLog>,
    enemies: Query<(Entity, &EnemyType, &EnemyAgent), With<Enemy>>,
    mut text_query: Query<&mut Text, With<DebugOverlayText>>,
) {
    if !overlay.visible {
        return;
    }
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let mut lines: Vec<String> = enemies
        .iter()
        .map(|(entity, enemy_type, agent)| {
            describe_agent(&format!("{} {}", enemy_type.0, entity), agent)
        })
        .collect();
    lines.push(String::new());
    lines.extend(log.entries().map(str::to_string));

    text.0 = lines.join("\n");
}

fn cleanup_overlay(mut commands: Commands, query: Query<Entity, With<DebugOverlayText>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{AgentTuning, Facing};

    #[test]
    fn describes_fresh_agent() {
        let agent = EnemyAgent::new(Vec2::new(2.0, 0.0), Facing::Right, AgentTuning::default());
        let line = describe_agent("skeleton", &agent);

        assert!(line.starts_with("skeleton Patrolling hp 3/3 x 2.0 Right"));
        assert!(line.contains("bounds [2.0, 10.0]"));
        assert!(line.ends_with("[- - - -]"));
    }

    #[test]
    fn event_log_keeps_newest_entries() {
        let mut log = EventLog::default();
        for i in 0..10 {
            log.push(format!("event {i}"));
        }

        let entries: Vec<&str> = log.entries().collect();
        assert_eq!(entries.len(), EVENT_LOG_LEN);
        assert_eq!(entries.first(), Some(&"event 4"));
        assert_eq!(entries.last(), Some(&"event 9"));
    }
}
