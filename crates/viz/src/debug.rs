//! Debug overlay for development information display.
//!
//! Shows FPS, the cursor in display and simulation coordinates, agent slots
//! and the number of agent-count warnings. Toggle with F3 key.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use replay_log::{DisplayMapping, DisplayPoint};
use std::collections::VecDeque;

use crate::camera::cursor_pixel;
use crate::state_loader::ReplayState;

/// Plugin for the debug overlay.
pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>()
            .add_systems(Startup, setup_debug_overlay)
            .add_systems(Update, (toggle_debug_overlay, update_debug_display).chain());
    }
}

/// Resource controlling debug overlay settings.
#[derive(Resource)]
pub struct DebugOverlay {
    /// Whether the debug overlay is visible.
    pub enabled: bool,
    /// Show FPS counter.
    pub show_fps: bool,
    /// Show cursor coordinates.
    pub show_cursor: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self {
            enabled: false,
            show_fps: true,
            show_cursor: true,
        }
    }
}

/// Component marking the debug overlay container.
#[derive(Component)]
pub struct DebugOverlayContainer;

/// Component for the debug text.
#[derive(Component)]
pub struct DebugText;

/// Local resource for FPS history.
#[derive(Default)]
struct FpsHistory {
    history: VecDeque<f32>,
}

impl FpsHistory {
    fn push(&mut self, fps: f32) {
        self.history.push_back(fps);
        if self.history.len() > 60 {
            self.history.pop_front();
        }
    }

    fn average(&self) -> f32 {
        if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().sum::<f32>() / self.history.len() as f32
        }
    }
}

/// Cursor line: display pixel and the simulation point it maps back to.
/// Rounding in the forward transform makes the simulation value approximate.
pub fn cursor_line(cursor: Option<DisplayPoint>, mapping: &DisplayMapping) -> String {
    match cursor {
        Some(pixel) => {
            let sim = mapping.sim_point(pixel);
            format!(
                "Cursor: ({}, {}) px = ({:.3}, {:.3}) m",
                pixel.x, pixel.y, sim.x, sim.y
            )
        }
        None => "Cursor: outside window".to_string(),
    }
}

/// System to set up the debug overlay UI.
fn setup_debug_overlay(mut commands: Commands) {
    // Debug overlay container (top-left)
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    padding: UiRect::all(Val::Px(8.0)),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.75).into(),
                visibility: Visibility::Hidden,
                ..default()
            },
            DebugOverlayContainer,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "DEBUG (F3 to toggle)",
                TextStyle {
                    font_size: 14.0,
                    color: Color::srgb(0.9, 0.9, 0.3),
                    ..default()
                },
            ));

            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 12.0,
                        color: Color::srgb(0.8, 0.8, 0.8),
                        ..default()
                    },
                ),
                DebugText,
            ));
        });
}

/// System to toggle debug overlay with F3.
fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_overlay: ResMut<DebugOverlay>,
    mut container: Query<&mut Visibility, With<DebugOverlayContainer>>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_overlay.enabled = !debug_overlay.enabled;

        for mut visibility in container.iter_mut() {
            *visibility = if debug_overlay.enabled {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        let status = if debug_overlay.enabled { "ON" } else { "OFF" };
        tracing::info!("Debug overlay: {}", status);
    }
}

/// System to update debug display data.
fn update_debug_display(
    debug_overlay: Res<DebugOverlay>,
    replay: Res<ReplayState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut fps_history: Local<FpsHistory>,
    mut debug_text: Query<&mut Text, With<DebugText>>,
) {
    let dt = time.delta_seconds();
    if dt > 0.0 {
        fps_history.push(1.0 / dt);
    }

    if !debug_overlay.enabled {
        return;
    }

    let mut lines = Vec::new();

    if debug_overlay.show_fps {
        let avg_fps = fps_history.average();
        let low = if avg_fps < 30.0 { "LOW!" } else { "" };
        lines.push(format!("FPS: {:.0} {}", avg_fps, low));
    }

    if debug_overlay.show_cursor {
        let cursor = windows
            .get_single()
            .ok()
            .and_then(Window::cursor_position)
            .map(cursor_pixel);
        lines.push(cursor_line(cursor, &replay.log.mapping));
    }

    lines.push(format!("Agent slots: {}", replay.log.agent_slots()));
    lines.push(format!("Count warnings: {}", replay.log.warnings.len()));

    for mut text in debug_text.iter_mut() {
        text.sections[0].value = lines.join("\n");
    }
}
