//! Tunable constants for enemy behavior.

use serde::Deserialize;

/// Every number the enemy state machine uses.
///
/// Defaults are the skeleton's shipped values; enemy definition files may
/// override any subset of them.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AgentTuning {
    /// Total width of the patrol path, spawn x to spawn x + width.
    pub patrol_width: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub detection_radius: f32,
    /// Extra distance a chasing agent tolerates before giving up (0 = no hysteresis).
    pub lose_sight_margin: f32,
    pub attack_range: f32,
    pub max_health: u8,
    /// Seconds of simulation time spent idling at each patrol end.
    pub wait_duration: f32,
    /// Seconds of simulation time an attack lasts.
    pub attack_duration: f32,
    /// Offset into the attack clip when the attack sound starts.
    pub attack_sound_offset: f32,
    pub knockback_speed: f32,
    /// Real seconds between the hurt animation restart and the hit-pause.
    pub hurt_windup: f32,
    /// Real seconds the hit-pause lasts.
    pub hit_pause: f32,
    /// Real seconds the knockback runs before velocity is zeroed.
    pub knockback_duration: f32,
    /// Simulation seconds after the knockback before the weapon hitbox re-arms.
    pub rearm_delay: f32,
    /// Real seconds the death clip plays before switching to the death idle clip.
    pub death_duration: f32,
    /// Real seconds in the death idle clip before reviving.
    pub revive_delay: f32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            patrol_width: 8.0,
            patrol_speed: 2.0,
            chase_speed: 4.0,
            detection_radius: 5.0,
            lose_sight_margin: 0.0,
            attack_range: 2.0,
            max_health: 3,
            wait_duration: 1.0,
            attack_duration: 1.05,
            attack_sound_offset: 0.05,
            knockback_speed: 6.0,
            hurt_windup: 0.01,
            hit_pause: 0.03,
            knockback_duration: 0.2,
            rearm_delay: 0.8,
            death_duration: 5.02,
            revive_delay: 1.02,
        }
    }
}

impl AgentTuning {
    /// Half the patrol width, used to recentre the patrol path while chasing.
    pub fn patrol_half_width(&self) -> f32 {
        self.patrol_width / 2.0
    }

    /// Total real time from a lethal hit to the revive.
    pub fn death_cycle(&self) -> f32 {
        self.death_duration + self.revive_delay
    }
}
