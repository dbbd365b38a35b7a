//! Combat systems - swing input and blade timing.

use bevy::prelude::*;

use super::components::*;
use crate::core::GameplaySet;
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(Update, swing_input.in_set(GameplaySet::Input))
        .add_systems(Update, tick_swing.in_set(GameplaySet::Combat));
}

/// Handle combat input from the player.
fn swing_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut CombatState, &Weapon), With<Player>>,
) {
    let Ok((mut combat, weapon)) = query.get_single_mut() else {
        return;
    };

    if (mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::KeyJ))
        && combat.start_swing(weapon)
    {
        debug!("{} swung", weapon.name);
    }
}

/// Advance swings and mark blade hitboxes as swinging during the active window.
fn tick_swing(
    time: Res<Time>,
    mut owners: Query<(&mut CombatState, &Weapon)>,
    mut hitboxes: Query<&mut WeaponHitbox>,
) {
    for mut hitbox in hitboxes.iter_mut() {
        let Ok((mut combat, weapon)) = owners.get_mut(hitbox.owner) else {
            hitbox.swinging = false;
            continue;
        };
        hitbox.swinging = combat.tick(time.delta(), weapon);
    }
}
