//! Keyboard-driven playback: maps keys to controller commands and reports
//! frame changes.

use bevy::prelude::*;
use replay_log::{PlaybackCommand, PlaybackState, ReplayLog, StepMagnitude, Transition};

use crate::state_loader::ReplayState;

/// Plugin for playback input handling.
pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FrameChangedEvent>().add_systems(
            Update,
            (handle_playback_keys, log_frame_change).chain(),
        );
    }
}

/// Playback position resource. Only [`handle_playback_keys`] mutates it.
#[derive(Resource, Debug, Clone, Deref)]
pub struct Playback(pub PlaybackState);

impl Playback {
    /// Playback over the whole run, starting at frame 0.
    pub fn new(log: &ReplayLog, initial_step: i64) -> Self {
        Self(PlaybackState::with_step(log.last_frame_index(), initial_step))
    }
}

/// Event emitted when the current frame changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameChangedEvent {
    pub from: usize,
    pub to: usize,
}

/// Key bindings, checked in this order each tick.
pub const KEY_BINDINGS: [(KeyCode, PlaybackCommand); 8] = [
    (KeyCode::KeyQ, PlaybackCommand::Quit),
    (KeyCode::Digit1, PlaybackCommand::SetStepMagnitude(StepMagnitude::One)),
    (KeyCode::Digit2, PlaybackCommand::SetStepMagnitude(StepMagnitude::Five)),
    (KeyCode::Digit3, PlaybackCommand::SetStepMagnitude(StepMagnitude::Ten)),
    (KeyCode::Digit4, PlaybackCommand::SetStepMagnitude(StepMagnitude::Twenty)),
    (KeyCode::Digit5, PlaybackCommand::SetStepMagnitude(StepMagnitude::Thirty)),
    (KeyCode::KeyN, PlaybackCommand::ReverseDirection),
    (KeyCode::Space, PlaybackCommand::Advance),
];

/// Command bound to a key, if any.
pub fn command_for_key(key: KeyCode) -> Option<PlaybackCommand> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, command)| *command)
}

/// System to turn key presses into playback commands.
fn handle_playback_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut playback: ResMut<Playback>,
    mut frame_events: EventWriter<FrameChangedEvent>,
    mut exit: EventWriter<AppExit>,
) {
    for (key, command) in KEY_BINDINGS {
        if !keyboard.just_pressed(key) {
            continue;
        }

        match playback.0.apply(command) {
            Transition::Idle => {}
            Transition::StepChanged(step) => {
                tracing::info!("Step size: {:+}", step);
            }
            Transition::FrameChanged { from, to } => {
                frame_events.send(FrameChangedEvent { from, to });
            }
            Transition::Quit => {
                tracing::info!("Quit");
                exit.send(AppExit::Success);
                return;
            }
        }
    }
}

/// System to log the poses of each newly shown frame.
fn log_frame_change(replay: Res<ReplayState>, mut events: EventReader<FrameChangedEvent>) {
    let radius = replay.log.agent_radius_px();

    for event in events.read() {
        let frame = replay.frame(event.to);
        tracing::info!(
            "Frame {} -> {} (t = {:.3} s)",
            event.from,
            event.to,
            frame.time_s
        );
        for (slot, agent) in replay.log.visible_agents(frame).iter().enumerate() {
            let center = agent.center(radius);
            tracing::debug!(
                "  agent {}: ({}, {}) heading {:.1}",
                agent.agent_id.map_or(slot as u32, |id| id),
                center.x,
                center.y,
                agent.heading_deg
            );
        }
    }
}
