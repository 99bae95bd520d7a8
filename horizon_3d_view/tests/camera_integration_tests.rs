//! Integration tests for the camera frame loop
//!
//! Drives a PerspectiveCamera through whole frames using only the public
//! `horizon3d` API: configuration, FOV animation, matrix upload into a
//! caller-provided RenderContext, reflection pass, frustum culling and
//! snapshots.
//!
//! Run with: cargo test --test camera_integration_tests

use horizon_3d_view::glam::{Mat4, Vec3, Vec4};
use horizon_3d_view::horizon3d::camera::{
    Camera, CameraSnapshot, MatrixMode, PerspectiveCamera, RenderContext, AABB,
};
use horizon_3d_view::horizon3d::composite::{
    combine, combine_fragment_source, CombineSample, CompositeFeatures,
};
use horizon_3d_view::horizon3d::config::{FovProvider, RenderingConfig};

// ============================================================================
// TEST RENDER CONTEXT
// ============================================================================

/// Render context keeping the current value of each matrix stack
#[derive(Default)]
struct RecordingContext {
    projection: Option<[f32; 16]>,
    model_view: Option<[f32; 16]>,
    load_count: usize,
}

impl RenderContext for RecordingContext {
    fn load_matrix(&mut self, mode: MatrixMode, matrix: &[f32; 16]) {
        match mode {
            MatrixMode::Projection => self.projection = Some(*matrix),
            MatrixMode::ModelView => self.model_view = Some(*matrix),
        }
        self.load_count += 1;
    }
}

/// Field of view setting the user can change between frames
struct UserSettings {
    fov: f32,
}

impl FovProvider for UserSettings {
    fn field_of_view(&self) -> f32 {
        self.fov
    }
}

fn create_camera(config: &dyn FovProvider) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(config);
    camera.state_mut().set_position(Vec3::new(0.0, 40.0, 0.0));
    camera.state_mut().set_viewing_direction(Vec3::new(0.0, 0.0, -1.0));
    camera
}

/// Run frames of `delta` seconds until the field of view settles
fn run_frames(camera: &mut PerspectiveCamera, ctx: &mut RecordingContext, delta: f32, max_frames: usize) -> usize {
    for frame in 0..max_frames {
        camera.begin_frame(delta);
        camera.look_through(ctx);
        camera.end_frame();
        if camera.state().active_fov() == camera.state().target_fov() {
            return frame + 1;
        }
    }
    max_frames
}

// ============================================================================
// FRAME LOOP TESTS
// ============================================================================

#[test]
fn test_integration_fov_settles_on_configured_value() {
    let config = RenderingConfig::default();
    let mut camera = create_camera(&config);
    let mut ctx = RecordingContext::default();

    // 22.5 -> 90 at 50 deg/s with 100 ms frames: 14 steps, then the snap
    let frames = run_frames(&mut camera, &mut ctx, 0.1, 100);

    assert_eq!(frames, 14);
    assert_eq!(camera.state().active_fov(), 90.0);
    assert_eq!(ctx.load_count, frames * 2);

    let expected = Mat4::perspective_rh_gl(90f32.to_radians(), 16.0 / 9.0, 0.1, 5000.0);
    assert_eq!(ctx.projection.unwrap(), expected.to_cols_array());
    assert_eq!(ctx.model_view.unwrap(), camera.state().view_matrix().to_cols_array());
}

#[test]
fn test_integration_zoom_follows_settings_changes() {
    let mut settings = UserSettings { fov: 70.0 };
    let mut camera = create_camera(&settings);
    let mut ctx = RecordingContext::default();
    run_frames(&mut camera, &mut ctx, 0.1, 100);
    assert_eq!(camera.state().active_fov(), 70.0);

    // Sprinting widens the view relative to the current setting
    settings.fov = 80.0;
    camera.state_mut().extend_fov(&settings, 10.0);
    assert_eq!(camera.state().target_fov(), 90.0);
    run_frames(&mut camera, &mut ctx, 0.1, 100);
    assert_eq!(camera.state().active_fov(), 90.0);

    camera.state_mut().reset_fov(&settings);
    camera.begin_frame(0.1);
    assert_eq!(camera.state().active_fov(), 85.0);
}

#[test]
fn test_integration_previous_view_projection_lags_one_frame() {
    let config = RenderingConfig::default();
    let mut camera = create_camera(&config);
    let mut ctx = RecordingContext::default();
    run_frames(&mut camera, &mut ctx, 0.1, 100);

    let frame_one = *camera.state().view_projection_matrix();

    camera.state_mut().set_position(Vec3::new(5.0, 40.0, 0.0));
    camera.begin_frame(0.1);

    assert_ne!(*camera.state().view_projection_matrix(), frame_one);
    assert_eq!(*camera.state().prev_view_projection_matrix(), frame_one);

    camera.end_frame();
    assert_eq!(
        *camera.state().prev_view_projection_matrix(),
        *camera.state().view_projection_matrix()
    );
}

// ============================================================================
// VISIBILITY TESTS
// ============================================================================

#[test]
fn test_integration_frustum_culling() {
    let config = RenderingConfig::default();
    let mut camera = create_camera(&config);
    camera.begin_frame(0.0);

    let frustum = camera.state().view_frustum();
    let in_front = AABB::new(Vec3::new(-1.0, 39.0, -30.0), Vec3::new(1.0, 41.0, -28.0));
    let behind = AABB::new(Vec3::new(-1.0, 39.0, 28.0), Vec3::new(1.0, 41.0, 30.0));
    let beyond_far = AABB::from_center_extents(Vec3::new(0.0, 40.0, -6000.0), Vec3::ONE);

    assert!(frustum.intersects_or_is_contained(&in_front));
    assert!(!frustum.intersects_or_is_contained(&behind));
    assert!(!frustum.intersects_or_is_contained(&beyond_far));
}

#[test]
fn test_integration_culling_while_looking_straight_down() {
    let config = RenderingConfig::default();
    let mut camera = create_camera(&config);
    let mut ctx = RecordingContext::default();

    camera.state_mut().set_position(Vec3::new(0.0, 50.0, 0.0));
    camera.state_mut().set_viewing_direction(Vec3::NEG_Y);
    for _ in 0..3 {
        camera.begin_frame(0.1);
        camera.look_through(&mut ctx);
        camera.end_frame();
    }

    assert!(ctx.model_view.unwrap().iter().all(|v| v.is_finite()));
    assert!(camera.state().prev_view_projection_matrix().is_finite());

    let frustum = camera.state().view_frustum();
    let ground = AABB::from_center_extents(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.5, 2.0));
    let overhead = AABB::from_center_extents(Vec3::new(0.0, 90.0, 0.0), Vec3::ONE);
    assert!(frustum.intersects_or_is_contained(&ground));
    assert!(!frustum.intersects_or_is_contained(&overhead));
}

#[test]
fn test_integration_reflection_pass() {
    let config = RenderingConfig::default();
    let mut camera = create_camera(&config);
    let mut ctx = RecordingContext::default();
    camera.begin_frame(0.0);

    camera.look_through(&mut ctx);
    let normal_view = ctx.model_view.unwrap();

    camera.state_mut().set_reflected(true);
    camera.update_matrices();
    camera.look_through(&mut ctx);
    let reflected_view = ctx.model_view.unwrap();
    assert_ne!(reflected_view, normal_view);

    // The reflected view sees the scene mirrored about the clip plane
    let h = camera.state().clip_height();
    let point = Vec3::new(2.0, 45.0, -20.0);
    let mirrored = Vec3::new(2.0, 2.0 * h - 45.0, -20.0);
    let a = Mat4::from_cols_array(&reflected_view).transform_point3(point);
    let b = Mat4::from_cols_array(&normal_view).transform_point3(mirrored);
    assert!((a - b).length() < 1e-3);

    // Snapshot of the reflected pass carries the reflected frustum
    let snapshot = CameraSnapshot::capture(camera.state());
    assert!(snapshot.is_reflected());
    assert_eq!(snapshot.frustum(), camera.state().view_frustum_reflected());
    assert_eq!(snapshot.view_matrix().to_cols_array(), reflected_view);

    camera.state_mut().set_reflected(false);
    camera.update_matrices();
    camera.look_through(&mut ctx);
    assert_eq!(ctx.model_view.unwrap(), normal_view);
}

#[test]
fn test_integration_skybox_pass_uses_normalized_view() {
    let config = RenderingConfig::default();
    let mut camera = create_camera(&config);
    let mut ctx = RecordingContext::default();
    camera.begin_frame(0.0);

    camera.look_through_normalized(&mut ctx);

    let model_view = ctx.model_view.unwrap();
    assert_eq!(&model_view[12..15], &[0.0, 0.0, 0.0]);
    assert_eq!(ctx.projection.unwrap(), camera.state().projection_matrix().to_cols_array());
}

// ============================================================================
// COMPOSITE TESTS
// ============================================================================

#[test]
fn test_integration_composite_follows_config() {
    let config = RenderingConfig {
        ssao: true,
        outline: true,
        ..RenderingConfig::default()
    };
    assert!(config.validate().is_ok());

    let features = config.composite_features();
    assert_eq!(features, CompositeFeatures::SSAO | CompositeFeatures::OUTLINE);

    let source = combine_fragment_source(features);
    assert!(source.starts_with("#version 120\n"));
    assert!(source.contains("#define SSAO"));
    assert!(source.contains("#define OUTLINE"));

    let sample = CombineSample {
        color_opaque: Vec4::new(1.0, 1.0, 1.0, 1.0),
        depth_opaque: 0.5,
        normals_opaque: Vec4::new(0.0, 1.0, 0.0, 1.0),
        light_buffer_opaque: Vec4::splat(0.25),
        color_transparent: Vec4::ZERO,
        ssao: 0.5,
        edge: 0.0,
    };
    let output = combine(&sample, features, &config.combine_uniforms());

    // No edge, fully transparent overlay: only the occlusion darkens
    assert_eq!(output.color, Vec4::new(0.5, 0.5, 0.5, 1.0));
    assert_eq!(output.depth, 0.5);
    assert_eq!(output.normals, sample.normals_opaque);
}
