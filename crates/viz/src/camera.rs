//! Camera setup and the mapping between display space and Bevy world space.
//!
//! Display space has its origin at the window's top-left with Y pointing
//! down, which is also how Bevy reports cursor positions. The default 2D
//! camera puts the world origin at the window center with Y pointing up.

use bevy::prelude::*;
use replay_log::{DisplayGeometry, DisplayPoint};

/// Plugin for the replay camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::WHITE))
            .add_systems(Startup, setup_camera);
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// System to set up the camera on startup.
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), MainCamera));
}

/// Converts a display-space position into Bevy world coordinates.
pub fn display_to_world(position: Vec2, geometry: &DisplayGeometry) -> Vec2 {
    let half = Vec2::new(geometry.width as f32, geometry.height as f32) / 2.0;
    Vec2::new(position.x - half.x, half.y - position.y)
}

/// Display point as a float vector.
pub fn point_vec(point: DisplayPoint) -> Vec2 {
    Vec2::new(point.x as f32, point.y as f32)
}

/// Display pixel under a cursor position.
pub fn cursor_pixel(cursor: Vec2) -> DisplayPoint {
    DisplayPoint::new(cursor.x.floor() as i32, cursor.y.floor() as i32)
}
