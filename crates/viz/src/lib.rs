//! Replay viewer: Bevy front end over a loaded run log.

pub mod camera;
pub mod config;
pub mod debug;
pub mod overlay;
pub mod playback;
pub mod plugin;
pub mod render;
pub mod state_loader;

pub use plugin::ReplayVizPlugin;
