//! UI module - pause banner and designer debug overlay.

mod overlay;
mod plugin;

pub use overlay::{describe_agent, DebugOverlay, EventLog};
pub use plugin::UiPlugin;
