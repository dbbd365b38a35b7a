//! Combat-related components.

use bevy::prelude::*;

/// Weapon definition component.
#[derive(Component, Clone, Debug)]
pub struct Weapon {
    pub name: String,
    /// Length of the blade hitbox in units
    pub reach: f32,
    /// Full swing length in seconds
    pub swing_duration: f32,
    /// Part of the swing (0.0-1.0) during which the blade can hit
    pub active_window: (f32, f32),
    /// Delay after a swing before the next one, in seconds
    pub attack_cooldown: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            name: "Short Sword".to_string(),
            reach: 1.6,
            swing_duration: 0.4,
            active_window: (0.25, 0.75),
            attack_cooldown: 0.2,
        }
    }
}

/// Swing timing for the entity holding a weapon.
#[derive(Component, Default, Debug)]
pub struct CombatState {
    swing: Option<Timer>,
    /// Cooldown left after the last swing
    pub attack_cooldown: f32,
}

impl CombatState {
    pub fn can_attack(&self) -> bool {
        self.swing.is_none() && self.attack_cooldown <= 0.0
    }

    pub fn is_swinging(&self) -> bool {
        self.swing.is_some()
    }

    /// Start a swing if the last one has finished and cooled down.
    pub fn start_swing(&mut self, weapon: &Weapon) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.swing = Some(Timer::from_seconds(weapon.swing_duration, TimerMode::Once));
        true
    }

    /// Advance the swing. Returns whether the blade is in its active window.
    pub fn tick(&mut self, delta: std::time::Duration, weapon: &Weapon) -> bool {
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown = (self.attack_cooldown - delta.as_secs_f32()).max(0.0);
        }

        let Some(timer) = self.swing.as_mut() else {
            return false;
        };
        timer.tick(delta);

        if timer.finished() {
            self.swing = None;
            self.attack_cooldown = weapon.attack_cooldown;
            return false;
        }

        let (start, end) = weapon.active_window;
        (start..end).contains(&timer.fraction())
    }
}

/// Sensor collider of a weapon blade.
///
/// Enemies only react to it while it is armed and mid-swing. Enemies disarm
/// it while they are recovering from a blow.
#[derive(Component, Clone, Copy, Debug)]
pub struct WeaponHitbox {
    /// The entity swinging the weapon
    pub owner: Entity,
    pub armed: bool,
    pub swinging: bool,
}

impl WeaponHitbox {
    pub fn new(owner: Entity) -> Self {
        Self {
            owner,
            armed: true,
            swinging: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.armed && self.swinging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn swing_is_active_only_inside_its_window() {
        let weapon = Weapon::default();
        let mut combat = CombatState::default();
        assert!(combat.start_swing(&weapon));

        assert!(!combat.tick(ms(50), &weapon));
        assert!(combat.tick(ms(100), &weapon));
        assert!(!combat.tick(ms(200), &weapon));
        assert!(combat.is_swinging());
    }

    #[test]
    fn cooldown_blocks_the_next_swing() {
        let weapon = Weapon::default();
        let mut combat = CombatState::default();
        combat.start_swing(&weapon);

        combat.tick(ms(400), &weapon);
        assert!(!combat.is_swinging());
        assert!(!combat.start_swing(&weapon));

        combat.tick(ms(250), &weapon);
        assert!(combat.start_swing(&weapon));
    }

    #[test]
    fn disarmed_hitbox_is_not_live() {
        let mut hitbox = WeaponHitbox::new(Entity::PLACEHOLDER);
        hitbox.swinging = true;
        assert!(hitbox.is_live());

        hitbox.armed = false;
        assert!(!hitbox.is_live());
    }
}
