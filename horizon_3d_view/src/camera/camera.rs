/// Camera - per-frame view and projection state shared by every camera kind.
///
/// `CameraState` is the composed base each concrete camera embeds. It owns
/// position and orientation, the animated field of view, the derived
/// matrices (normal and reflected sets) and the two view frustums.
///
/// `CameraState` never builds a view or projection itself: concrete cameras
/// implement the `Camera` trait hooks and store their results through the
/// variant-facing setters. Per frame, the owner runs:
///
/// 1. `update(delta)` (field of view smoothing)
/// 2. `Camera::update_matrices()` (variant rebuild)
/// 3. `update_frustum()`
/// 4. draw calls through `Camera::look_through*()`
/// 5. `update_prev_view_projection_matrix()`

use glam::{Mat4, Vec3};
use crate::config::FovProvider;
use crate::math::{is_valid_matrix, matrix_to_buffer};
use crate::render_context::RenderContext;
use super::view_frustum::ViewFrustum;

/// Rate at which the active field of view chases its target, in degrees per second
pub const FOV_ANIMATION_SPEED: f32 = 50.0;

/// Below this distance (degrees) the active field of view snaps to the target
pub const FOV_SNAP_THRESHOLD: f32 = 1.0;

/// Height of the water / clip plane that reflection cameras mirror about
pub const CLIP_HEIGHT: f32 = 31.5;

const LOG_SOURCE: &str = "horizon3d::Camera";

/// State shared by all camera kinds.
#[derive(Debug, Clone)]
pub struct CameraState {
    position: Vec3,
    up: Vec3,
    viewing_direction: Vec3,

    target_fov: f32,
    active_fov: f32,

    view_frustum: ViewFrustum,
    view_frustum_reflected: ViewFrustum,

    projection_matrix: Mat4,
    inverse_projection_matrix: Mat4,
    norm_view_matrix: Mat4,
    view_matrix: Mat4,
    view_projection_matrix: Mat4,
    inverse_view_projection_matrix: Mat4,
    prev_view_projection_matrix: Mat4,
    reflection_matrix: Mat4,

    view_matrix_reflected: Mat4,
    norm_view_matrix_reflected: Mat4,

    // Last state a variant rebuilt its matrices from
    cached_position: Vec3,
    cached_viewing_direction: Vec3,
    cached_fov: f32,

    reflected: bool,
}

impl CameraState {
    /// Camera at the origin looking down +X, identity matrices.
    ///
    /// The target field of view comes from `config`; the active one starts
    /// at a quarter of it, so the first frames zoom in.
    pub fn new(config: &dyn FovProvider) -> Self {
        let target_fov = config.field_of_view();
        let state = Self {
            position: Vec3::ZERO,
            up: Vec3::Y,
            viewing_direction: Vec3::X,
            target_fov,
            active_fov: target_fov / 4.0,
            view_frustum: ViewFrustum::new(),
            view_frustum_reflected: ViewFrustum::new(),
            projection_matrix: Mat4::IDENTITY,
            inverse_projection_matrix: Mat4::IDENTITY,
            norm_view_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            inverse_view_projection_matrix: Mat4::IDENTITY,
            prev_view_projection_matrix: Mat4::IDENTITY,
            reflection_matrix: Mat4::IDENTITY,
            view_matrix_reflected: Mat4::IDENTITY,
            norm_view_matrix_reflected: Mat4::IDENTITY,
            cached_position: Vec3::ZERO,
            cached_viewing_direction: Vec3::ZERO,
            cached_fov: 0.0,
            reflected: false,
        };

        crate::engine_debug!(LOG_SOURCE, "Camera created (target fov {}, active fov {})",
            state.target_fov, state.active_fov);

        state
    }

    // ===== PER-FRAME OPERATIONS =====

    /// Move the active field of view toward the target.
    ///
    /// Within `FOV_SNAP_THRESHOLD` degrees the value snaps to the target.
    /// Otherwise it moves `FOV_ANIMATION_SPEED * delta` degrees and is
    /// clamped so it never passes the target.
    pub fn update(&mut self, delta: f32) {
        let diff = (self.active_fov - self.target_fov).abs();
        if diff < FOV_SNAP_THRESHOLD {
            self.active_fov = self.target_fov;
            return;
        }

        let step = FOV_ANIMATION_SPEED * delta;
        if self.active_fov < self.target_fov {
            self.active_fov = (self.active_fov + step).min(self.target_fov);
        } else {
            self.active_fov = (self.active_fov - step).max(self.target_fov);
        }

        crate::engine_trace!(LOG_SOURCE, "fov {} -> target {}", self.active_fov, self.target_fov);
    }

    /// Target the configured field of view plus `delta` degrees.
    ///
    /// Calls overwrite each other; they do not accumulate.
    pub fn extend_fov(&mut self, config: &dyn FovProvider, delta: f32) {
        self.target_fov = config.field_of_view() + delta;
    }

    /// Target the configured field of view again
    pub fn reset_fov(&mut self, config: &dyn FovProvider) {
        self.target_fov = config.field_of_view();
    }

    /// Select which matrix set `view_matrix()` / `norm_view_matrix()` return.
    /// Recomputes nothing.
    pub fn set_reflected(&mut self, reflected: bool) {
        self.reflected = reflected;
    }

    /// Rebuild both frustums from the current matrices.
    ///
    /// The normal frustum uses (`view_matrix`, projection) and the reflected
    /// one (`view_matrix_reflected`, projection); both share the projection.
    ///
    /// Skipped when the active view matrix or the projection matrix holds a
    /// non-finite element: the frustums then keep their last valid planes.
    /// Returns whether the frustums were rebuilt.
    pub fn update_frustum(&mut self) -> bool {
        if !is_valid_matrix(self.view_matrix()) || !is_valid_matrix(&self.projection_matrix) {
            crate::engine_trace!(LOG_SOURCE, "Frustum update skipped: matrices not ready");
            return false;
        }

        let projection = matrix_to_buffer(&self.projection_matrix);
        self.view_frustum.update_frustum(&matrix_to_buffer(&self.view_matrix), &projection);
        self.view_frustum_reflected
            .update_frustum(&matrix_to_buffer(&self.view_matrix_reflected), &projection);
        true
    }

    /// Snapshot the current view-projection matrix for next frame's consumers.
    ///
    /// Call once per frame, after the last matrix rebuild of that frame.
    pub fn update_prev_view_projection_matrix(&mut self) {
        self.prev_view_projection_matrix = self.view_projection_matrix;
    }

    /// Height of the clip plane used by reflection passes
    pub fn clip_height(&self) -> f32 {
        CLIP_HEIGHT
    }

    // ===== VARIANT-FACING MUTATORS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    pub fn set_viewing_direction(&mut self, viewing_direction: Vec3) {
        self.viewing_direction = viewing_direction;
    }

    /// Store a new projection matrix and its inverse
    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection_matrix = projection;
        self.inverse_projection_matrix = projection.inverse();
    }

    /// Store the view matrix and its translation-free counterpart
    pub fn set_view_matrices(&mut self, view: Mat4, norm_view: Mat4) {
        self.view_matrix = view;
        self.norm_view_matrix = norm_view;
    }

    /// Store the mirrored view matrices and the mirror transform they were built with
    pub fn set_reflected_view_matrices(&mut self, view: Mat4, norm_view: Mat4, reflection: Mat4) {
        self.view_matrix_reflected = view;
        self.norm_view_matrix_reflected = norm_view;
        self.reflection_matrix = reflection;
    }

    /// Recompute `projection * view_matrix()` and its inverse.
    ///
    /// Uses the currently active (normal or reflected) view matrix. Variants
    /// call this last in every rebuild.
    pub fn update_view_projection(&mut self) {
        self.view_projection_matrix = self.projection_matrix * *self.view_matrix();
        self.inverse_view_projection_matrix = self.view_projection_matrix.inverse();
    }

    /// Whether position, viewing direction or `fov` differ from the last
    /// `mark_clean` call
    pub fn is_dirty(&self, fov: f32) -> bool {
        self.cached_position != self.position
            || self.cached_viewing_direction != self.viewing_direction
            || self.cached_fov != fov
    }

    /// Remember the state matrices were just rebuilt from
    pub fn mark_clean(&mut self, fov: f32) {
        self.cached_position = self.position;
        self.cached_viewing_direction = self.viewing_direction;
        self.cached_fov = fov;
    }

    // ===== GETTERS =====

    /// Active view matrix (reflected set when `is_reflected()`)
    pub fn view_matrix(&self) -> &Mat4 {
        if self.reflected { &self.view_matrix_reflected } else { &self.view_matrix }
    }

    /// Active translation-free view matrix (reflected set when `is_reflected()`)
    pub fn norm_view_matrix(&self) -> &Mat4 {
        if self.reflected { &self.norm_view_matrix_reflected } else { &self.norm_view_matrix }
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn inverse_projection_matrix(&self) -> &Mat4 {
        &self.inverse_projection_matrix
    }

    /// Projection * active view, as of the last `update_view_projection()`
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    pub fn inverse_view_projection_matrix(&self) -> &Mat4 {
        &self.inverse_view_projection_matrix
    }

    /// View-projection matrix captured by the last `update_prev_view_projection_matrix()`
    pub fn prev_view_projection_matrix(&self) -> &Mat4 {
        &self.prev_view_projection_matrix
    }

    pub fn reflection_matrix(&self) -> &Mat4 {
        &self.reflection_matrix
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn viewing_direction(&self) -> Vec3 {
        self.viewing_direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn target_fov(&self) -> f32 {
        self.target_fov
    }

    pub fn active_fov(&self) -> f32 {
        self.active_fov
    }

    pub fn is_reflected(&self) -> bool {
        self.reflected
    }

    pub fn view_frustum(&self) -> &ViewFrustum {
        &self.view_frustum
    }

    pub fn view_frustum_reflected(&self) -> &ViewFrustum {
        &self.view_frustum_reflected
    }
}

/// Capabilities every concrete camera provides.
///
/// Implementors embed a `CameraState` and supply the matrix formulas.
/// Trait objects are supported (`&mut dyn Camera`).
pub trait Camera {
    fn state(&self) -> &CameraState;

    fn state_mut(&mut self) -> &mut CameraState;

    /// Push the projection matrix into `ctx`
    fn load_projection_matrix(&self, ctx: &mut dyn RenderContext);

    /// Push the active view matrix into `ctx`
    fn load_model_view_matrix(&self, ctx: &mut dyn RenderContext);

    /// Push the active translation-free view matrix into `ctx`
    fn load_normalized_model_view_matrix(&self, ctx: &mut dyn RenderContext);

    /// Rebuild every matrix for the given field of view (degrees), which may
    /// differ from the animated one
    fn update_matrices_with_fov(&mut self, fov: f32);

    /// Rebuild every matrix for the animated field of view
    fn update_matrices(&mut self) {
        let fov = self.state().active_fov();
        self.update_matrices_with_fov(fov);
    }

    /// Apply projection and view matrices. Call before the frame's draw calls.
    fn look_through(&self, ctx: &mut dyn RenderContext) {
        self.load_projection_matrix(ctx);
        self.load_model_view_matrix(ctx);
    }

    /// Apply projection and the view matrix without translation, as if the
    /// camera sat at the origin (skyboxes, far-away effects).
    fn look_through_normalized(&self, ctx: &mut dyn RenderContext) {
        self.load_projection_matrix(ctx);
        self.load_normalized_model_view_matrix(ctx);
    }

    /// Steps 1-3 of the frame: smooth the field of view, rebuild, refresh frustums
    fn begin_frame(&mut self, delta: f32) {
        self.state_mut().update(delta);
        self.update_matrices();
        self.state_mut().update_frustum();
    }

    /// Last step of the frame: keep this frame's view-projection for the next one
    fn end_frame(&mut self) {
        self.state_mut().update_prev_view_projection_matrix();
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
