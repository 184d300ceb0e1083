//! Status line: frame position, frame time, step size and key legend.

use bevy::prelude::*;
use replay_log::{Frame, PlaybackState};

use crate::playback::Playback;
use crate::state_loader::ReplayState;

/// Plugin for the always-visible status overlay.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_status_bar)
            .add_systems(Update, update_status_bar);
    }
}

/// Component for the status text.
#[derive(Component)]
pub struct StatusText;

pub const KEY_LEGEND: &str = "[1-5] step  [N] reverse  [Space] advance  [Q] quit  [F3] debug";

/// Status text for the given playback position.
pub fn status_line(playback: &PlaybackState, frame: &Frame) -> String {
    format!(
        "Frame {}/{}  t = {:.3} s  step {:+}",
        playback.current_frame(),
        playback.last_frame(),
        frame.time_s,
        playback.step_size()
    )
}

/// System to set up the status bar (bottom-left).
fn setup_status_bar(mut commands: Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                bottom: Val::Px(4.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 14.0,
                        color: Color::BLACK,
                        ..default()
                    },
                ),
                StatusText,
            ));
            parent.spawn(TextBundle::from_section(
                KEY_LEGEND,
                TextStyle {
                    font_size: 11.0,
                    color: Color::srgb(0.4, 0.4, 0.4),
                    ..default()
                },
            ));
        });
}

/// System to refresh the status text when playback moves.
fn update_status_bar(
    replay: Res<ReplayState>,
    playback: Res<Playback>,
    spawned: Query<(), Added<StatusText>>,
    mut texts: Query<&mut Text, With<StatusText>>,
) {
    if !playback.is_changed() && spawned.is_empty() {
        return;
    }

    let line = status_line(&playback, replay.frame(playback.current_frame()));
    for mut text in texts.iter_mut() {
        text.sections[0].value = line.clone();
    }
}
