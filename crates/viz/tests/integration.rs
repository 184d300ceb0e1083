//! Integration tests for the viewer: keys through playback to drawn shapes.

use bevy::prelude::KeyCode;
use replay_log::{fixtures, PlaybackCommand, PlaybackState, ReplayLog, Transition};
use std::fs;
use tempfile::tempdir;
use viz::config::ViewerConfig;
use viz::playback::command_for_key;
use viz::render::{frame_shapes, Shape};
use viz::state_loader::ReplayState;

fn press(state: &mut PlaybackState, key: KeyCode) -> Transition {
    let command = command_for_key(key).expect("key is bound");
    state.apply(command)
}

fn agent_centers(log: &ReplayLog, index: usize) -> Vec<(f32, f32)> {
    frame_shapes(log, &log.frames[index])
        .filter_map(|shape| match shape {
            Shape::Agent { center, .. } => Some((center.x, center.y)),
            _ => None,
        })
        .collect()
}

/// Pressing 1 then Space moves the agent from bottom-left to top-right.
#[test]
fn test_step_forward_moves_agent() {
    let log = fixtures::two_step_log();
    let mut state = PlaybackState::new(log.last_frame_index());

    assert_eq!(agent_centers(&log, state.current_frame()), vec![(68.0, 532.0)]);

    press(&mut state, KeyCode::Digit1);
    assert_eq!(
        press(&mut state, KeyCode::Space),
        Transition::FrameChanged { from: 0, to: 1 }
    );
    assert_eq!(agent_centers(&log, state.current_frame()), vec![(532.0, 68.0)]);

    // At the last frame a forward step does nothing.
    assert_eq!(press(&mut state, KeyCode::Space), Transition::Idle);
}

/// A large backward step from mid-run lands on frame 0.
#[test]
fn test_reverse_large_step_clamps_to_start() {
    let log = fixtures::arena_log();
    let mut state = PlaybackState::new(log.last_frame_index());

    press(&mut state, KeyCode::Digit1);
    press(&mut state, KeyCode::Space);
    assert_eq!(state.current_frame(), 1);

    press(&mut state, KeyCode::KeyN);
    press(&mut state, KeyCode::Digit5);
    assert_eq!(state.step_size(), -30);
    assert_eq!(
        press(&mut state, KeyCode::Space),
        Transition::FrameChanged { from: 1, to: 0 }
    );
}

/// Once the last frame is reached, reversing does not leave it.
#[test]
fn test_last_frame_holds_after_reverse() {
    let log = fixtures::arena_log();
    let mut state = PlaybackState::new(log.last_frame_index());

    press(&mut state, KeyCode::Digit5);
    press(&mut state, KeyCode::Space);
    assert_eq!(state.current_frame(), log.last_frame_index());

    press(&mut state, KeyCode::KeyN);
    assert_eq!(press(&mut state, KeyCode::Space), Transition::Idle);
    assert_eq!(state.current_frame(), log.last_frame_index());
}

#[test]
fn test_quit_key() {
    assert_eq!(command_for_key(KeyCode::KeyQ), Some(PlaybackCommand::Quit));
}

/// A config file changes the display the log is mapped onto.
#[test]
fn test_config_display_drives_mapping() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("replay.toml");
    let log_path = dir.path().join("log_file.xml");
    fs::write(&config_path, "[display]\nwidth = 1000\nheight = 800\nmargin = 20\n").unwrap();
    fs::write(&log_path, fixtures::two_step_log_xml()).unwrap();

    let config = ViewerConfig::resolve(Some(&config_path)).unwrap();
    let replay = ReplayState::load(&log_path, config.display).unwrap();

    // min(960 / 1, 760 / 1) = 760 px per meter.
    assert_eq!(replay.log.mapping.scale, 760.0);
    let shapes: Vec<Shape> = frame_shapes(&replay.log, replay.frame(0)).collect();
    assert!(shapes.contains(&Shape::Circle {
        center: bevy::math::Vec2::new(400.0, 400.0),
        radius: 76.0,
    }));
}

/// Sensor beams appear only on frames that recorded them.
#[test]
fn test_sensor_beams_follow_frames() {
    let log = fixtures::arena_log();
    let beams: Vec<usize> = log
        .frames
        .iter()
        .map(|frame| {
            frame_shapes(&log, frame)
                .filter(|shape| matches!(shape, Shape::SensorHit { .. }))
                .count()
        })
        .collect();
    assert_eq!(beams, vec![0, 1, 0]);
}
