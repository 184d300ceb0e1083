//! Sample run logs for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers from other
//! crates.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // replay-log = { path = "../replay-log", features = ["test-fixtures"] }
//!
//! use replay_log::fixtures;
//!
//! let log = fixtures::two_step_log();
//! assert_eq!(log.frame_count(), 2);
//! ```

use crate::{DisplayGeometry, ReplayLog};

/// A 1 m x 1 m world with one circle at the center and one agent that jumps
/// from (0.1, 0.1) heading 0 degrees to (0.9, 0.9) heading 90 degrees.
pub fn two_step_log_xml() -> &'static str {
    include_str!("../tests/fixtures/two_step_log.xml")
}

/// A 4 m x 2 m arena with three obstacles, two agents, a sensor hit in the
/// second step, and a third step where one agent is missing.
pub fn arena_log_xml() -> &'static str {
    include_str!("../tests/fixtures/arena_log.xml")
}

/// [`two_step_log_xml`] loaded onto the default 600 x 600 display.
pub fn two_step_log() -> ReplayLog {
    ReplayLog::from_xml_str(two_step_log_xml(), DisplayGeometry::default())
        .expect("Failed to load two_step_log.xml")
}

/// [`arena_log_xml`] loaded onto the default 600 x 600 display.
pub fn arena_log() -> ReplayLog {
    ReplayLog::from_xml_str(arena_log_xml(), DisplayGeometry::default())
        .expect("Failed to load arena_log.xml")
}
