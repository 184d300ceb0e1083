//! In-memory model of a recorded run.
//!
//! Everything here is built once by the loader and read-only afterwards.
//! Geometry is stored in display space so the render loop never repeats the
//! trigonometry or the scaling.

use crate::transform::{DisplayMapping, DisplayPoint, SimPoint};

/// World parameters from the run header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Simulated seconds between recorded steps.
    pub time_step_seconds: f64,
    /// World width in meters. Always positive.
    pub width_m: f64,
    /// World height in meters. Always positive.
    pub height_m: f64,
    /// Radius shared by every agent, in meters.
    pub agent_radius_m: f64,
}

/// A fixed circular obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCircle {
    pub center_m: SimPoint,
    pub radius_m: f64,
    /// Center in display space.
    pub center: DisplayPoint,
    /// Radius in whole pixels.
    pub radius_px: i32,
}

impl StaticCircle {
    pub fn new(center_m: SimPoint, radius_m: f64, mapping: &DisplayMapping) -> Self {
        Self {
            center_m,
            radius_m,
            center: mapping.point(center_m),
            radius_px: mapping.length(radius_m),
        }
    }
}

/// A fixed, possibly rotated, rectangular obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRectangle {
    pub center_m: SimPoint,
    pub half_extent_m: SimPoint,
    pub rotation_deg: f64,
    /// Rotated corners in display space, cached at load time.
    pub corners: [DisplayPoint; 4],
}

impl StaticRectangle {
    pub fn new(
        center_m: SimPoint,
        half_extent_m: SimPoint,
        rotation_deg: f64,
        mapping: &DisplayMapping,
    ) -> Self {
        Self {
            center_m,
            half_extent_m,
            rotation_deg,
            corners: mapping.rect_corners(center_m, half_extent_m, rotation_deg),
        }
    }
}

/// Obstacles that never change across frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticScene {
    pub circles: Vec<StaticCircle>,
    pub rectangles: Vec<StaticRectangle>,
}

impl StaticScene {
    pub fn len(&self) -> usize {
        self.circles.len() + self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One agent's pose in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPose {
    /// Identifier written by the simulator, when present.
    pub agent_id: Option<u32>,
    /// Top-left corner of the agent's bounding box in display space.
    pub position: DisplayPoint,
    /// Heading in degrees, counter-clockwise from +X in simulation space.
    pub heading_deg: f64,
}

impl AgentPose {
    /// Center of the agent's circle, given the agent radius in pixels.
    pub fn center(&self, radius_px: i32) -> DisplayPoint {
        self.position.outset(radius_px)
    }
}

/// A sensor beam that hit something during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorHit {
    pub beam_start: DisplayPoint,
    pub beam_end: DisplayPoint,
    pub intersection: DisplayPoint,
}

/// One recorded time step.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Position in the frame table.
    pub index: usize,
    /// Simulated time of this step in seconds.
    pub time_s: f64,
    /// Agents in the same identity order as every other frame.
    pub agents: Vec<AgentPose>,
    pub sensor_hits: Vec<SensorHit>,
}

/// A frame whose agent count differs from the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyWarning {
    pub step: usize,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time step {} has {} agents, expected {}",
            self.step, self.found, self.expected
        )
    }
}

/// A fully loaded recorded run, ready for playback.
#[derive(Debug, Clone)]
pub struct ReplayLog {
    pub world: WorldConfig,
    pub mapping: DisplayMapping,
    pub scene: StaticScene,
    /// Never empty.
    pub frames: Vec<Frame>,
    /// Agent count mismatches found while loading.
    pub warnings: Vec<ConsistencyWarning>,
}

impl ReplayLog {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of agents the renderer tracks: the first frame's agent count.
    pub fn agent_slots(&self) -> usize {
        self.frames.first().map_or(0, |f| f.agents.len())
    }

    /// Agent radius in whole pixels.
    pub fn agent_radius_px(&self) -> i32 {
        self.mapping.length(self.world.agent_radius_m)
    }

    /// Agents of a frame that have a render slot. Short frames yield fewer.
    pub fn visible_agents<'a>(&self, frame: &'a Frame) -> &'a [AgentPose] {
        let count = self.agent_slots().min(frame.agents.len());
        &frame.agents[..count]
    }
}
