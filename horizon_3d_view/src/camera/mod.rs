//! Camera module - camera state, camera kinds, view frustum.
//!
//! Cameras are owned and driven by the caller, once per frame:
//! `update` → `update_matrices` → `update_frustum` → `look_through*` →
//! `update_prev_view_projection_matrix`.

mod aabb;
mod camera;
mod camera_snapshot;
mod perspective_camera;
mod view_frustum;

pub use aabb::AABB;
pub use camera::{
    Camera, CameraState,
    CLIP_HEIGHT, FOV_ANIMATION_SPEED, FOV_SNAP_THRESHOLD,
};
pub use camera_snapshot::CameraSnapshot;
pub use perspective_camera::PerspectiveCamera;
pub use view_frustum::{
    ViewFrustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
