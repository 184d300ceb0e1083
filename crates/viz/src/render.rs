//! Frame rendering: the static scene plus the current frame's agents and
//! sensor beams, redrawn every tick with gizmos.

use bevy::prelude::*;
use replay_log::{DisplayPoint, Frame, ReplayLog};

use crate::camera::{display_to_world, point_vec};
use crate::playback::Playback;
use crate::state_loader::ReplayState;

/// Plugin for drawing the replayed scene.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Palette>()
            .add_systems(Update, draw_frame);
    }
}

/// Colors for each kind of shape.
#[derive(Resource, Debug, Clone)]
pub struct Palette {
    pub boundary: Color,
    pub circle: Color,
    pub rectangle: Color,
    pub agent: Color,
    pub heading: Color,
    pub beam: Color,
    pub hit: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            boundary: Color::BLACK,
            circle: Color::srgb(1.0, 0.0, 0.0),
            rectangle: Color::srgb(0.0, 0.0, 1.0),
            agent: Color::srgb(0.0, 0.8, 0.0),
            heading: Color::srgb(0.0, 0.0, 1.0),
            beam: Color::srgb(0.6, 0.6, 0.6),
            hit: Color::srgb(1.0, 0.0, 1.0),
        }
    }
}

/// Radius of the sensor intersection marker, in pixels.
pub const HIT_MARKER_RADIUS: f32 = 3.0;

/// One drawable primitive, in display-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// World boundary as a closed outline.
    Boundary([Vec2; 4]),
    Circle { center: Vec2, radius: f32 },
    Rectangle([Vec2; 4]),
    /// Agent disc with a heading line from its center.
    Agent {
        center: Vec2,
        radius: f32,
        heading_end: Vec2,
    },
    SensorHit { start: Vec2, end: Vec2, hit: Vec2 },
}

fn corners_vec(corners: [DisplayPoint; 4]) -> [Vec2; 4] {
    corners.map(point_vec)
}

/// Shapes for one frame, back to front: boundary, static scene, sensor
/// beams, then agents. Agents beyond the first frame's count are skipped.
pub fn frame_shapes<'a>(log: &'a ReplayLog, frame: &'a Frame) -> impl Iterator<Item = Shape> + 'a {
    let boundary = std::iter::once(Shape::Boundary(corners_vec(log.mapping.geometry.boundary())));

    let circles = log.scene.circles.iter().map(|circle| Shape::Circle {
        center: point_vec(circle.center),
        radius: circle.radius_px as f32,
    });

    let rectangles = log
        .scene
        .rectangles
        .iter()
        .map(|rect| Shape::Rectangle(corners_vec(rect.corners)));

    let hits = frame.sensor_hits.iter().map(|hit| Shape::SensorHit {
        start: point_vec(hit.beam_start),
        end: point_vec(hit.beam_end),
        hit: point_vec(hit.intersection),
    });

    let radius_px = log.agent_radius_px();
    let agents = log.visible_agents(frame).iter().map(move |agent| {
        let center = point_vec(agent.center(radius_px));
        let radius = radius_px as f32;
        let heading = (agent.heading_deg as f32).to_radians();
        // Display Y points down, so a counter-clockwise heading flips sign.
        let heading_end = center + radius * Vec2::new(heading.cos(), -heading.sin());
        Shape::Agent {
            center,
            radius,
            heading_end,
        }
    });

    boundary
        .chain(circles)
        .chain(rectangles)
        .chain(hits)
        .chain(agents)
}

/// System to draw the current frame.
fn draw_frame(
    replay: Res<ReplayState>,
    playback: Res<Playback>,
    palette: Res<Palette>,
    mut gizmos: Gizmos,
) {
    let geometry = replay.log.mapping.geometry;
    let world = |p: Vec2| display_to_world(p, &geometry);
    let frame = replay.frame(playback.current_frame());

    for shape in frame_shapes(&replay.log, frame) {
        match shape {
            Shape::Boundary(corners) => {
                closed_outline(&mut gizmos, corners.map(world), palette.boundary);
            }
            Shape::Circle { center, radius } => {
                gizmos.circle_2d(world(center), radius, palette.circle);
            }
            Shape::Rectangle(corners) => {
                closed_outline(&mut gizmos, corners.map(world), palette.rectangle);
            }
            Shape::Agent {
                center,
                radius,
                heading_end,
            } => {
                gizmos.circle_2d(world(center), radius, palette.agent);
                gizmos.line_2d(world(center), world(heading_end), palette.heading);
            }
            Shape::SensorHit { start, end, hit } => {
                gizmos.line_2d(world(start), world(end), palette.beam);
                gizmos.circle_2d(world(hit), HIT_MARKER_RADIUS, palette.hit);
            }
        }
    }
}

fn closed_outline(gizmos: &mut Gizmos, corners: [Vec2; 4], color: Color) {
    gizmos.linestrip_2d(corners.into_iter().chain(std::iter::once(corners[0])), color);
}
