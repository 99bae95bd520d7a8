/// CameraSnapshot - immutable copy of a camera's matrices for one pass.
///
/// Camera state is mutated every frame and is not synchronized. A pass that
/// runs elsewhere (another thread, a deferred command list) takes a snapshot
/// instead of borrowing the live camera.

use glam::{Mat4, Vec3};
use super::camera::CameraState;
use super::view_frustum::ViewFrustum;

/// Frozen camera matrices and the frustum matching the active view
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSnapshot {
    position: Vec3,
    view_matrix: Mat4,
    norm_view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
    inverse_view_projection_matrix: Mat4,
    prev_view_projection_matrix: Mat4,
    frustum: ViewFrustum,
    reflected: bool,
}

impl CameraSnapshot {
    /// Copy the active matrix set (normal or reflected) out of `state`
    pub fn capture(state: &CameraState) -> Self {
        let frustum = if state.is_reflected() {
            *state.view_frustum_reflected()
        } else {
            *state.view_frustum()
        };

        Self {
            position: state.position(),
            view_matrix: *state.view_matrix(),
            norm_view_matrix: *state.norm_view_matrix(),
            projection_matrix: *state.projection_matrix(),
            view_projection_matrix: *state.view_projection_matrix(),
            inverse_view_projection_matrix: *state.inverse_view_projection_matrix(),
            prev_view_projection_matrix: *state.prev_view_projection_matrix(),
            frustum,
            reflected: state.is_reflected(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn norm_view_matrix(&self) -> &Mat4 {
        &self.norm_view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    pub fn inverse_view_projection_matrix(&self) -> &Mat4 {
        &self.inverse_view_projection_matrix
    }

    pub fn prev_view_projection_matrix(&self) -> &Mat4 {
        &self.prev_view_projection_matrix
    }

    /// Frustum of the active view (reflected frustum for a reflected snapshot)
    pub fn frustum(&self) -> &ViewFrustum {
        &self.frustum
    }

    pub fn is_reflected(&self) -> bool {
        self.reflected
    }
}

#[cfg(test)]
#[path = "camera_snapshot_tests.rs"]
mod tests;
