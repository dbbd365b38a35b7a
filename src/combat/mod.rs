//! Combat module - the player's weapon and its hitbox.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
