//! Recorded run model for the replay viewer.
//!
//! This crate loads a simulator's run log into an immutable, frame-indexed
//! table with all geometry already in display space, and owns the playback
//! state machine that steps through it. It has no rendering dependency.

pub mod document;
pub mod error;
pub mod loader;
pub mod model;
pub mod playback;
pub mod transform;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use document::LogNode;
pub use error::{
    ConfigError, DocumentError, FieldError, GeometryError, LoadError, RecordKind, ShapeKind,
};
pub use loader::load;
pub use model::{
    AgentPose, ConsistencyWarning, Frame, ReplayLog, SensorHit, StaticCircle, StaticRectangle,
    StaticScene, WorldConfig,
};
pub use playback::{PlaybackCommand, PlaybackState, StepMagnitude, Transition};
pub use transform::{
    from_display_x, from_display_y, rotated_rect_corners, scale_factor, to_display_x,
    to_display_y, DisplayGeometry, DisplayMapping, DisplayPoint, SimPoint,
};
