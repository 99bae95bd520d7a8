//! Rendering context seam
//!
//! A camera "looks through" by pushing matrices into whatever matrix state
//! the active graphics backend keeps (fixed-function matrix stack, uniform
//! block, push constants...). The backend implements `RenderContext`.

/// Matrix slot a camera writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixMode {
    /// Camera space to clip space
    Projection,
    /// World space to camera space
    ModelView,
}

/// Destination for camera matrices.
///
/// Matrices arrive as column-major float buffers; see `math::matrix_to_buffer`.
pub trait RenderContext {
    /// Replace the matrix held in `mode`
    fn load_matrix(&mut self, mode: MatrixMode, matrix: &[f32; 16]);
}
