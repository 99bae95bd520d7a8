//! Matrix helpers shared by the camera and the frustum

use glam::Mat4;

/// Column-major float buffer of a matrix, as uploaded to a rendering context
pub fn matrix_to_buffer(matrix: &Mat4) -> [f32; 16] {
    bytemuck::cast(*matrix)
}

/// Rebuild a matrix from a column-major float buffer
pub fn matrix_from_buffer(buffer: &[f32; 16]) -> Mat4 {
    Mat4::from_cols_array(buffer)
}

/// A matrix is usable when every element is finite
pub fn is_valid_matrix(matrix: &Mat4) -> bool {
    matrix.is_finite()
}

/// Mirror about the horizontal plane `y = height`
pub fn reflection_about_height(height: f32) -> Mat4 {
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, -1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 2.0 * height, 0.0, 1.0,
    ])
}
