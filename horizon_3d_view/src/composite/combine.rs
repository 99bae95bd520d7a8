/// Combine pass - blends transparent geometry over the opaque scene.
///
/// Per fragment:
/// 1. SSAO (optional): opaque rgb is multiplied by the occlusion term
/// 2. OUTLINE (optional): fragments whose edge value reaches the threshold
///    are pulled toward black by `outline_thickness`
/// 3. `fade = clamp(1 - transparent.a, 0, 1)`, color = mix(transparent, opaque, fade)
/// 4. normals and light buffer pass through, depth is the opaque depth

use bitflags::bitflags;
use glam::{Vec3, Vec4};

/// GLSL dialect the combine shader is written for
pub const GLSL_VERSION: &str = "#version 120";

/// Fragment shader source without version or feature defines
pub const COMBINE_FRAGMENT_SOURCE: &str = include_str!("../../shaders/combine.frag");

/// Color blended into outlined fragments
pub const OUTLINE_COLOR: Vec3 = Vec3::ZERO;

bitflags! {
    /// Compile-time features of the combine shader
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompositeFeatures: u32 {
        /// Modulate opaque color by ambient occlusion
        const SSAO = 1 << 0;
        /// Outline depth discontinuities
        const OUTLINE = 1 << 1;
    }
}

impl CompositeFeatures {
    /// `#define` lines enabling these features, one per line
    pub fn defines(self) -> String {
        let mut defines = String::new();
        if self.contains(CompositeFeatures::SSAO) {
            defines.push_str("#define SSAO\n");
        }
        if self.contains(CompositeFeatures::OUTLINE) {
            defines.push_str("#define OUTLINE\n");
        }
        defines
    }
}

/// Uniforms read by the OUTLINE feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombineUniforms {
    pub outline_depth_threshold: f32,
    pub outline_thickness: f32,
}

/// Texel values sampled at one screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombineSample {
    pub color_opaque: Vec4,
    pub depth_opaque: f32,
    pub normals_opaque: Vec4,
    pub light_buffer_opaque: Vec4,
    pub color_transparent: Vec4,
    /// Ambient occlusion term, read when SSAO is enabled
    pub ssao: f32,
    /// Depth-edge strength, read when OUTLINE is enabled
    pub edge: f32,
}

/// Values written by the combine pass for one fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombineOutput {
    /// Render target 0
    pub color: Vec4,
    /// Render target 1 (opaque normals, unchanged)
    pub normals: Vec4,
    /// Render target 2 (opaque light buffer, unchanged)
    pub light_buffer: Vec4,
    /// Fragment depth (opaque depth)
    pub depth: f32,
}

/// Shade one fragment exactly as `combine.frag` does
pub fn combine(sample: &CombineSample, features: CompositeFeatures, uniforms: &CombineUniforms) -> CombineOutput {
    let mut opaque = sample.color_opaque;

    if features.contains(CompositeFeatures::SSAO) {
        opaque = (opaque.truncate() * sample.ssao).extend(opaque.w);
    }

    if features.contains(CompositeFeatures::OUTLINE) {
        let outline = step(uniforms.outline_depth_threshold, sample.edge) * uniforms.outline_thickness;
        opaque = opaque.truncate().lerp(OUTLINE_COLOR, outline).extend(opaque.w);
    }

    let fade = (1.0 - sample.color_transparent.w).clamp(0.0, 1.0);

    CombineOutput {
        color: sample.color_transparent.lerp(opaque, fade),
        normals: sample.normals_opaque,
        light_buffer: sample.light_buffer_opaque,
        depth: sample.depth_opaque,
    }
}

/// Full fragment source: version line, feature defines, then the shader body
pub fn combine_fragment_source(features: CompositeFeatures) -> String {
    format!("{}\n{}{}", GLSL_VERSION, features.defines(), COMBINE_FRAGMENT_SOURCE)
}

/// GLSL `step(edge, x)`
fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

#[cfg(test)]
#[path = "combine_tests.rs"]
mod tests;
