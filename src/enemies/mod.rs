//! Enemies module - the patrolling enemy agent and its Bevy host systems.

pub mod agent;
pub mod ai;
pub mod animation;
pub mod audio;
mod components;
pub mod data;
pub mod hit_pause;
pub mod motion;
mod plugin;
pub mod sequence;
mod spawning;
pub mod tuning;

pub use agent::{EnemyAgent, Facing, MapLimits, Mode};
pub use components::*;
pub use data::EnemyRegistry;
pub use hit_pause::HitPause;
pub use motion::facing_rotation;
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemySpawn};
pub use tuning::AgentTuning;
