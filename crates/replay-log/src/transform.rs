//! Simulation-space to display-space transforms.
//!
//! Simulation space is measured in meters with the origin at the bottom-left
//! and Y increasing upward. Display space is measured in whole pixels with the
//! origin at the top-left and Y increasing downward, inset by a fixed margin on
//! every side.
//!
//! The forward transforms round to whole pixels, so the inverse transforms
//! only recover a simulation coordinate to within half a pixel's worth of
//! meters (`0.5 / scale`). That loss is accepted: the inverses exist for
//! diagnostic overlays, never for reconstructing the recorded run.

use serde::{Deserialize, Serialize};

/// Size of the display surface and the margin kept clear on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayGeometry {
    /// Surface width in pixels.
    pub width: i32,
    /// Surface height in pixels.
    pub height: i32,
    /// Margin in pixels between the surface edge and the world boundary.
    pub margin: i32,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            margin: 10,
        }
    }
}

impl DisplayGeometry {
    /// Usable width once the margin is removed from both sides.
    pub fn inner_width(&self) -> i32 {
        self.width - 2 * self.margin
    }

    /// Usable height once the margin is removed from both sides.
    pub fn inner_height(&self) -> i32 {
        self.height - 2 * self.margin
    }

    /// Corners of the world boundary inset by the margin, in winding order.
    pub fn boundary(&self) -> [DisplayPoint; 4] {
        let m = self.margin;
        [
            DisplayPoint::new(m, m),
            DisplayPoint::new(m, self.height - m),
            DisplayPoint::new(self.width - m, self.height - m),
            DisplayPoint::new(self.width - m, m),
        ]
    }
}

/// A point in simulation space (meters, Y-up).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimPoint {
    pub x: f64,
    pub y: f64,
}

impl SimPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in display space (pixels, Y-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

impl DisplayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offsets both axes by `-amount`.
    pub fn inset(self, amount: i32) -> Self {
        Self::new(self.x - amount, self.y - amount)
    }

    /// Offsets both axes by `+amount`.
    pub fn outset(self, amount: i32) -> Self {
        Self::new(self.x + amount, self.y + amount)
    }
}

/// Uniform scale that fits a `width_m` x `height_m` world inside the display
/// without distortion.
pub fn scale_factor(width_m: f64, height_m: f64, display: &DisplayGeometry) -> f64 {
    let scale_w = f64::from(display.inner_width()) / width_m;
    let scale_h = f64::from(display.inner_height()) / height_m;
    scale_w.min(scale_h)
}

/// Converts a length in meters to whole pixels.
pub fn to_display_length(length_m: f64, scale: f64) -> i32 {
    (length_m * scale).round() as i32
}

pub fn to_display_x(x_m: f64, scale: f64, margin: i32) -> i32 {
    to_display_length(x_m, scale) + margin
}

/// Flips the Y axis: simulation space is Y-up, the display surface is Y-down.
pub fn to_display_y(y_m: f64, scale: f64, margin: i32, display_height: i32) -> i32 {
    display_height - (to_display_length(y_m, scale) + margin)
}

pub fn from_display_x(x_px: i32, scale: f64, margin: i32) -> f64 {
    f64::from(x_px - margin) / scale
}

pub fn from_display_y(y_px: i32, scale: f64, margin: i32, display_height: i32) -> f64 {
    f64::from(display_height - y_px - margin) / scale
}

/// Corners of a rectangle rotated about its own center, in simulation space.
///
/// Corners come out in a fixed winding: top-left, top-right, bottom-right,
/// bottom-left of the unrotated rectangle. Rotation is counter-clockwise
/// positive, in degrees.
pub fn rotated_rect_corners(
    center: SimPoint,
    half_extent: SimPoint,
    rotation_deg: f64,
) -> [SimPoint; 4] {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let offsets = [
        (-half_extent.x, half_extent.y),
        (half_extent.x, half_extent.y),
        (half_extent.x, -half_extent.y),
        (-half_extent.x, -half_extent.y),
    ];

    offsets.map(|(dx, dy)| SimPoint {
        x: center.x + cos * dx - sin * dy,
        y: center.y + sin * dx + cos * dy,
    })
}

/// Transform between one recorded world and one display surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    pub geometry: DisplayGeometry,
    pub scale: f64,
}

impl DisplayMapping {
    /// Builds the mapping for a world of the given size in meters.
    pub fn new(width_m: f64, height_m: f64, geometry: DisplayGeometry) -> Self {
        Self {
            geometry,
            scale: scale_factor(width_m, height_m, &geometry),
        }
    }

    pub fn x(&self, x_m: f64) -> i32 {
        to_display_x(x_m, self.scale, self.geometry.margin)
    }

    pub fn y(&self, y_m: f64) -> i32 {
        to_display_y(y_m, self.scale, self.geometry.margin, self.geometry.height)
    }

    pub fn point(&self, p: SimPoint) -> DisplayPoint {
        DisplayPoint::new(self.x(p.x), self.y(p.y))
    }

    pub fn length(&self, length_m: f64) -> i32 {
        to_display_length(length_m, self.scale)
    }

    /// Inverse of [`DisplayMapping::point`], lossy up to rounding.
    pub fn sim_point(&self, p: DisplayPoint) -> SimPoint {
        SimPoint::new(
            from_display_x(p.x, self.scale, self.geometry.margin),
            from_display_y(p.y, self.scale, self.geometry.margin, self.geometry.height),
        )
    }

    /// Rotates a rectangle in simulation space, then maps each corner.
    pub fn rect_corners(
        &self,
        center: SimPoint,
        half_extent: SimPoint,
        rotation_deg: f64,
    ) -> [DisplayPoint; 4] {
        rotated_rect_corners(center, half_extent, rotation_deg).map(|corner| self.point(corner))
    }
}
