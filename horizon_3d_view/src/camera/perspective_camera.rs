/// PerspectiveCamera - standard first-person perspective camera.
///
/// Right-handed, OpenGL clip conventions. Supports view bobbing (a sideways
/// tilt of the up vector plus a vertical eye offset) and a mirrored matrix
/// set for reflections about the plane `y = clip_height()`.

use glam::{Mat4, Vec3};
use crate::config::FovProvider;
use crate::error::Horizon3dResult;
use crate::math::{matrix_to_buffer, reflection_about_height};
use crate::render_context::{MatrixMode, RenderContext};
use super::camera::{Camera, CameraState};

const LOG_SOURCE: &str = "horizon3d::PerspectiveCamera";

// Below this squared length the up vector is treated as parallel to the viewing direction
const PARALLEL_EPSILON: f32 = 1e-8;

/// Perspective camera with bobbing and reflection support
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    state: CameraState,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
    bobbing_rotation_offset: f32,
    bobbing_vertical_offset: f32,
    // Set when a parameter outside the dirty-check cache changes
    parameters_changed: bool,
    cached_up: Vec3,
    // Camera right vector of the last rebuild
    last_right: Vec3,
}

impl PerspectiveCamera {
    pub const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;
    pub const DEFAULT_Z_NEAR: f32 = 0.1;
    pub const DEFAULT_Z_FAR: f32 = 5000.0;

    pub fn new(config: &dyn FovProvider) -> Self {
        Self {
            state: CameraState::new(config),
            aspect_ratio: Self::DEFAULT_ASPECT_RATIO,
            z_near: Self::DEFAULT_Z_NEAR,
            z_far: Self::DEFAULT_Z_FAR,
            bobbing_rotation_offset: 0.0,
            bobbing_vertical_offset: 0.0,
            parameters_changed: true,
            cached_up: Vec3::ZERO,
            last_right: Vec3::ZERO,
        }
    }

    /// Width / height of the viewport. Must be finite and positive.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Horizon3dResult<()> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            crate::engine_bail!(LOG_SOURCE, InvalidParameter,
                "aspect ratio {} must be finite and positive", aspect_ratio);
        }
        self.aspect_ratio = aspect_ratio;
        self.parameters_changed = true;
        Ok(())
    }

    /// Near and far clip distances. Requires `0 < z_near < z_far`, both finite.
    pub fn set_clipping_planes(&mut self, z_near: f32, z_far: f32) -> Horizon3dResult<()> {
        if !z_near.is_finite() || !z_far.is_finite() || z_near <= 0.0 || z_near >= z_far {
            crate::engine_bail!(LOG_SOURCE, InvalidParameter,
                "clipping planes near {} / far {} must satisfy 0 < near < far", z_near, z_far);
        }
        self.z_near = z_near;
        self.z_far = z_far;
        self.parameters_changed = true;
        Ok(())
    }

    /// Tilt of the up vector toward the camera's right, as a fraction of it
    pub fn set_bobbing_rotation_offset(&mut self, offset: f32) {
        self.bobbing_rotation_offset = offset;
        self.parameters_changed = true;
    }

    /// Vertical eye offset in world units
    pub fn set_bobbing_vertical_offset(&mut self, offset: f32) {
        self.bobbing_vertical_offset = offset;
        self.parameters_changed = true;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    fn rebuild(&mut self, fov: f32) {
        let state = &mut self.state;

        let projection = Mat4::perspective_rh_gl(fov.to_radians(), self.aspect_ratio, self.z_near, self.z_far);

        let direction = state.viewing_direction();
        let forward = direction.normalize_or_zero();
        let right = side_vector(forward, state.up(), self.last_right);
        let base_up = right.cross(forward);
        let up = (base_up + right * self.bobbing_rotation_offset).try_normalize().unwrap_or(base_up);
        let eye = state.position() + Vec3::new(0.0, self.bobbing_vertical_offset, 0.0);

        let view = Mat4::look_to_rh(eye, direction, up);
        let norm_view = Mat4::look_to_rh(Vec3::ZERO, direction, up);

        let reflection = reflection_about_height(state.clip_height());
        let view_reflected = view * reflection;
        let norm_view_reflected = norm_view * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

        state.set_projection_matrix(projection);
        state.set_view_matrices(view, norm_view);
        state.set_reflected_view_matrices(view_reflected, norm_view_reflected, reflection);
        state.mark_clean(fov);
        self.cached_up = state.up();
        self.last_right = right;
        self.parameters_changed = false;
    }
}

/// Unit right vector of a camera looking along `forward`.
///
/// When `up` is parallel to `forward` (looking straight down or up) the
/// previous right vector is kept, projected onto the plane facing `forward`.
fn side_vector(forward: Vec3, up: Vec3, last_right: Vec3) -> Vec3 {
    let right = forward.cross(up);
    if right.length_squared() > PARALLEL_EPSILON {
        return right.normalize();
    }
    (last_right - forward * last_right.dot(forward))
        .try_normalize()
        .unwrap_or_else(|| forward.any_orthonormal_vector())
}

impl Camera for PerspectiveCamera {
    fn state(&self) -> &CameraState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    fn load_projection_matrix(&self, ctx: &mut dyn RenderContext) {
        ctx.load_matrix(MatrixMode::Projection, &matrix_to_buffer(self.state.projection_matrix()));
    }

    fn load_model_view_matrix(&self, ctx: &mut dyn RenderContext) {
        ctx.load_matrix(MatrixMode::ModelView, &matrix_to_buffer(self.state.view_matrix()));
    }

    fn load_normalized_model_view_matrix(&self, ctx: &mut dyn RenderContext) {
        ctx.load_matrix(MatrixMode::ModelView, &matrix_to_buffer(self.state.norm_view_matrix()));
    }

    fn update_matrices_with_fov(&mut self, fov: f32) {
        if self.parameters_changed || self.cached_up != self.state.up() || self.state.is_dirty(fov) {
            self.rebuild(fov);
        }
        // The active set can change through set_reflected() without a rebuild
        self.state.update_view_projection();
    }
}

#[cfg(test)]
#[path = "perspective_camera_tests.rs"]
mod tests;
