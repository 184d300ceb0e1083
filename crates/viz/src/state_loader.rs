//! Loaded recorded run, shared read-only with every system.

use bevy::prelude::*;
use replay_log::{DisplayGeometry, Frame, LoadError, ReplayLog};
use std::path::{Path, PathBuf};

/// Plugin that reports the loaded run at startup.
pub struct StateLoaderPlugin;

impl Plugin for StateLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, report_loaded_replay);
    }
}

/// The recorded run being replayed. Never mutated after insertion.
#[derive(Resource)]
pub struct ReplayState {
    /// Frame table and static scene.
    pub log: ReplayLog,
    /// File the run was loaded from.
    pub source: PathBuf,
}

impl ReplayState {
    /// Load a run log from disk onto the given display.
    pub fn load(path: &Path, geometry: DisplayGeometry) -> Result<Self, LoadError> {
        let log = ReplayLog::from_file(path, geometry)?;
        Ok(Self {
            log,
            source: path.to_path_buf(),
        })
    }

    /// The frame at `index`, or the last frame if `index` is past the end.
    pub fn frame(&self, index: usize) -> &Frame {
        let index = index.min(self.log.last_frame_index());
        &self.log.frames[index]
    }
}

/// System to log a summary of the loaded run.
fn report_loaded_replay(replay: Res<ReplayState>) {
    let log = &replay.log;
    tracing::info!(
        "Loaded {:?}: {} frames, {} agents, {} circles, {} rectangles, scale {:.3} px/m",
        replay.source,
        log.frame_count(),
        log.agent_slots(),
        log.scene.circles.len(),
        log.scene.rectangles.len(),
        log.mapping.scale
    );
    tracing::info!(
        "World {} x {} m, time step {} s, agent radius {} m",
        log.world.width_m,
        log.world.height_m,
        log.world.time_step_seconds,
        log.world.agent_radius_m
    );
    if !log.warnings.is_empty() {
        tracing::warn!(
            "{} time steps have a different agent count than the first; extra agents are not drawn",
            log.warnings.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_log::fixtures;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_replay_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log_file.xml");
        fs::write(&path, fixtures::two_step_log_xml()).unwrap();

        let state = ReplayState::load(&path, DisplayGeometry::default()).unwrap();
        assert_eq!(state.source, path);
        assert_eq!(state.log.frame_count(), 2);
    }

    #[test]
    fn test_frame_lookup_clamps() {
        let state = ReplayState {
            log: fixtures::two_step_log(),
            source: PathBuf::from("log_file.xml"),
        };
        assert_eq!(state.frame(0).index, 0);
        assert_eq!(state.frame(1).index, 1);
        assert_eq!(state.frame(99).index, 1);
    }
}
