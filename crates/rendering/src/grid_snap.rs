//! Grid snapping and yaw-step helpers for building placement.

use bevy::prelude::*;

/// Nearest multiple of `cell_size`.
pub fn snap_to_grid(value: f32, cell_size: f32) -> f32 {
    (value / cell_size).round() * cell_size
}

/// Snap the horizontal components of a point to the placement grid; the
/// height passes through untouched.
pub fn snap_xz(point: Vec3, cell_size: f32) -> Vec3 {
    Vec3::new(
        snap_to_grid(point.x, cell_size),
        point.y,
        snap_to_grid(point.z, cell_size),
    )
}

/// Advance an accumulated yaw by one rotation step, wrapped to [0, 360).
pub fn step_yaw(yaw_degrees: f32, step_degrees: f32) -> f32 {
    (yaw_degrees + step_degrees) % 360.0
}
