//! Core types: math re-exports, Transform, Camera, app state and scenes.

pub use glam::{EulerRot, Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod ecs;
pub mod input;
pub mod scene;
pub mod transform;
