//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};

use crate::camera::CameraPlugin;
use crate::config::ViewerConfig;
use crate::debug::DebugPlugin;
use crate::overlay::OverlayPlugin;
use crate::playback::PlaybackPlugin;
use crate::render::RenderPlugin;
use crate::state_loader::StateLoaderPlugin;

/// Main plugin for the replay viewer.
///
/// Sets up a fixed-size window matching the display geometry and adds all
/// sub-plugins. The app also needs [`ReplayState`](crate::state_loader::ReplayState)
/// and [`Playback`](crate::playback::Playback) resources before it runs.
pub struct ReplayVizPlugin {
    pub config: ViewerConfig,
}

impl Plugin for ReplayVizPlugin {
    fn build(&self, app: &mut App) {
        let display = self.config.display;
        let window = &self.config.window;

        let update_mode = || match window.frame_interval() {
            Some(wait) => UpdateMode::reactive(wait),
            None => UpdateMode::Continuous,
        };

        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: (display.width as f32, display.height as f32).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(WinitSettings {
            focused_mode: update_mode(),
            unfocused_mode: update_mode(),
        })
        .add_plugins((
            CameraPlugin,
            StateLoaderPlugin,
            PlaybackPlugin,
            RenderPlugin,
            OverlayPlugin,
            DebugPlugin,
        ));
    }
}
