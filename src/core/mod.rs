//! Core game module - states, events, data loading and system ordering.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod states;

pub use data::{read_ron, ron_files};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
