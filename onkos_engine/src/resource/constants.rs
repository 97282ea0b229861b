//! Constant buffer layouts and camera math.
//!
//! Matrices are stored transposed (row-major) because the HLSL side reads
//! them with the default column-major packing.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use crate::config::CameraConfig;

/// View matrix, written once at startup
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CbNeverChanges {
    pub view: Mat4,
}

/// Projection matrix, written at startup and on every resize
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CbChangeOnResize {
    pub projection: Mat4,
}

/// Per-object data, written every frame
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CbChangesEveryFrame {
    pub world: Mat4,
    pub mesh_color: Vec4,
}

impl CbNeverChanges {
    pub fn from_camera(camera: &CameraConfig) -> Self {
        Self { view: view_matrix(camera).transpose() }
    }
}

impl CbChangeOnResize {
    pub fn from_camera(camera: &CameraConfig, aspect_ratio: f32) -> Self {
        Self { projection: projection_matrix(camera, aspect_ratio).transpose() }
    }
}

impl CbChangesEveryFrame {
    pub fn new(world: Mat4, mesh_color: Vec4) -> Self {
        Self { world: world.transpose(), mesh_color }
    }
}

/// Left-handed look-at view matrix
pub fn view_matrix(camera: &CameraConfig) -> Mat4 {
    Mat4::look_at_lh(camera.eye, camera.target, camera.up)
}

/// Left-handed perspective projection with a 0..1 depth range
pub fn projection_matrix(camera: &CameraConfig, aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_lh(camera.fov_y_radians, aspect_ratio, camera.near, camera.far)
}

/// Mesh animation at `elapsed` seconds: world rotation about Y and a cycling tint
pub fn animate(elapsed: f32, position: Vec3, scale: Vec3) -> (Mat4, Vec4) {
    let world = Mat4::from_translation(position)
        * Mat4::from_rotation_y(elapsed)
        * Mat4::from_scale(scale);
    let color = Vec4::new(
        (elapsed.sin() + 1.0) * 0.5,
        ((3.0 * elapsed).cos() + 1.0) * 0.5,
        ((5.0 * elapsed).sin() + 1.0) * 0.5,
        1.0,
    );
    (world, color)
}

#[cfg(test)]
#[path = "constants_tests.rs"]
mod tests;
