//! Builds a [`ReplayLog`] from a recorded run document.
//!
//! Expected layout:
//!
//! ```text
//! <data_log>
//!   <time_step_in_s/> <sim_x_in_m/> <sim_y_in_m/> <agent_radius/>
//!   <object>
//!     <circle> x y radius </circle>
//!     <rectangle> x y halfx halfy rotation </rectangle>
//!   </object>
//!   <time_step>
//!     <time_at/>
//!     <agent> agent_id x y angle </agent>
//!     <sensor_beam> beam_x1 beam_y1 beam_x2 beam_y2
//!                   point_intersect_x point_intersect_y </sensor_beam>
//!   </time_step>
//! </data_log>
//! ```

use std::path::Path;

use crate::document::LogNode;
use crate::error::{ConfigError, FieldError, GeometryError, LoadError, RecordKind, ShapeKind};
use crate::model::{
    AgentPose, ConsistencyWarning, Frame, ReplayLog, SensorHit, StaticCircle, StaticRectangle,
    StaticScene, WorldConfig,
};
use crate::transform::{DisplayGeometry, DisplayMapping, DisplayPoint, SimPoint};

impl ReplayLog {
    /// Reads and loads a run log from disk.
    pub fn from_file(path: &Path, geometry: DisplayGeometry) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_xml_str(&source, geometry)
    }

    /// Loads a run log from XML text.
    pub fn from_xml_str(source: &str, geometry: DisplayGeometry) -> Result<Self, LoadError> {
        let root = LogNode::parse_xml(source)?;
        load(&root, geometry)
    }
}

/// Loads a recorded run from its document tree.
pub fn load(root: &LogNode, geometry: DisplayGeometry) -> Result<ReplayLog, LoadError> {
    let world = read_world(root)?;
    let mapping = DisplayMapping::new(world.width_m, world.height_m, geometry);
    let scene = read_scene(root, &mapping)?;

    let steps = root.find_all("time_step");
    if steps.is_empty() {
        return Err(LoadError::NoFrames);
    }

    let agent_radius_px = mapping.length(world.agent_radius_m);
    let mut frames = Vec::with_capacity(steps.len());
    for (index, step) in steps.into_iter().enumerate() {
        frames.push(read_frame(index, step, &world, &mapping, agent_radius_px)?);
    }

    let warnings = check_agent_counts(&frames);
    for warning in &warnings {
        tracing::warn!("Inconsistent run log: {}", warning);
    }

    Ok(ReplayLog {
        world,
        mapping,
        scene,
        frames,
        warnings,
    })
}

fn read_world(root: &LogNode) -> Result<WorldConfig, ConfigError> {
    Ok(WorldConfig {
        time_step_seconds: world_field(root, "time_step_in_s")?,
        width_m: positive_world_field(root, "sim_x_in_m")?,
        height_m: positive_world_field(root, "sim_y_in_m")?,
        agent_radius_m: world_field(root, "agent_radius")?,
    })
}

fn world_field(root: &LogNode, field: &'static str) -> Result<f64, ConfigError> {
    root.number(field).map_err(|source| ConfigError::Field { field, source })
}

fn positive_world_field(root: &LogNode, field: &'static str) -> Result<f64, ConfigError> {
    let value = world_field(root, field)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Optional agent id; must be a non-negative integer that fits in `u32`.
fn read_agent_id(agent: &LogNode) -> Result<Option<u32>, FieldError> {
    match agent.optional_number("agent_id")? {
        None => Ok(None),
        Some(id) if id.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&id) => {
            Ok(Some(id as u32))
        }
        Some(_) => {
            let text = agent.field("agent_id").unwrap_or_default();
            Err(FieldError::Invalid(text.to_string()))
        }
    }
}

fn read_scene(root: &LogNode, mapping: &DisplayMapping) -> Result<StaticScene, GeometryError> {
    let Some(object) = root.find("object") else {
        tracing::debug!("Run log has no object section, static scene is empty");
        return Ok(StaticScene::default());
    };

    let mut scene = StaticScene::default();

    for (index, node) in object.find_all("circle").into_iter().enumerate() {
        let field = |field: &'static str| {
            node.number(field).map_err(|source| GeometryError {
                kind: ShapeKind::Circle,
                index,
                field,
                source,
            })
        };
        let center = SimPoint::new(field("x")?, field("y")?);
        scene
            .circles
            .push(StaticCircle::new(center, field("radius")?, mapping));
    }

    for (index, node) in object.find_all("rectangle").into_iter().enumerate() {
        let field = |field: &'static str| {
            node.number(field).map_err(|source| GeometryError {
                kind: ShapeKind::Rectangle,
                index,
                field,
                source,
            })
        };
        let center = SimPoint::new(field("x")?, field("y")?);
        let half_extent = SimPoint::new(field("halfx")?, field("halfy")?);
        scene.rectangles.push(StaticRectangle::new(
            center,
            half_extent,
            field("rotation")?,
            mapping,
        ));
    }

    Ok(scene)
}

fn read_frame(
    step: usize,
    node: &LogNode,
    world: &WorldConfig,
    mapping: &DisplayMapping,
    agent_radius_px: i32,
) -> Result<Frame, LoadError> {
    let record_error =
        |kind: RecordKind, index: usize, field: &'static str, source: FieldError| {
            LoadError::FrameRecord {
                step,
                kind,
                index,
                field,
                source,
            }
        };

    let time_s = node
        .optional_number("time_at")
        .map_err(|source| record_error(RecordKind::TimeStep, 0, "time_at", source))?
        .unwrap_or(step as f64 * world.time_step_seconds);

    let mut agents = Vec::new();
    for (index, agent) in node.find_all("agent").into_iter().enumerate() {
        let field = |field: &'static str| {
            agent
                .number(field)
                .map_err(|source| record_error(RecordKind::Agent, index, field, source))
        };
        let center = mapping.point(SimPoint::new(field("x")?, field("y")?));
        let agent_id = read_agent_id(agent)
            .map_err(|source| record_error(RecordKind::Agent, index, "agent_id", source))?;

        agents.push(AgentPose {
            agent_id,
            position: center.inset(agent_radius_px),
            heading_deg: field("angle")?,
        });
    }

    let mut sensor_hits = Vec::new();
    for (index, beam) in node.find_all("sensor_beam").into_iter().enumerate() {
        let point = |x: &'static str, y: &'static str| -> Result<DisplayPoint, LoadError> {
            let read = |field: &'static str| {
                beam.number(field)
                    .map_err(|source| record_error(RecordKind::SensorBeam, index, field, source))
            };
            Ok(mapping.point(SimPoint::new(read(x)?, read(y)?)))
        };

        sensor_hits.push(SensorHit {
            beam_start: point("beam_x1", "beam_y1")?,
            beam_end: point("beam_x2", "beam_y2")?,
            intersection: point("point_intersect_x", "point_intersect_y")?,
        });
    }

    Ok(Frame {
        index: step,
        time_s,
        agents,
        sensor_hits,
    })
}

/// Compares every frame's agent count against the first frame.
fn check_agent_counts(frames: &[Frame]) -> Vec<ConsistencyWarning> {
    let Some(expected) = frames.first().map(|f| f.agents.len()) else {
        return Vec::new();
    };

    frames
        .iter()
        .filter(|frame| frame.agents.len() != expected)
        .map(|frame| ConsistencyWarning {
            step: frame.index,
            expected,
            found: frame.agents.len(),
        })
        .collect()
}
