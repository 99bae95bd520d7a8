/*!
# Horizon 3D View

Camera and view state for the Horizon3D renderer.

A camera keeps the view and projection state a renderer needs each frame:
position and orientation, an animated field of view, the derived matrices
(view, projection, combined, inverses, previous frame) and the two view
frustums (normal and reflected) used for visibility culling.

## Architecture

- **CameraState**: state shared by every camera kind (FOV smoothing, matrix
  storage, frustum refresh, reflection switch)
- **Camera**: trait each camera kind implements to build its matrices and
  push them into a **RenderContext**
- **PerspectiveCamera**: first-person perspective camera
- **ViewFrustum**: clip planes and visibility queries
- **composite**: reference of the pass combining opaque and transparent buffers
- **Engine**: process-wide logger behind the `engine_*!` macros
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod config;
pub mod render_context;
pub mod camera;
pub mod composite;

// Main horizon3d namespace module
pub mod horizon3d {
    // Error types
    pub use crate::error::{Horizon3dError, Horizon3dResult};
    pub use crate::error::{Horizon3dError as Error, Horizon3dResult as Result};

    // Engine-wide services
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Configuration sub-module
    pub mod config {
        pub use crate::config::{FovProvider, RenderingConfig};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
        pub use crate::render_context::{MatrixMode, RenderContext};
    }

    // Composite pass sub-module
    pub mod composite {
        pub use crate::composite::*;
    }
}

// Re-export math library at crate root
pub use glam;
