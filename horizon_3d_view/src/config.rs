//! Rendering configuration
//!
//! The owner of a camera holds the configuration and hands it to the camera
//! when the base field of view is needed (construction, `extend_fov`,
//! `reset_fov`). Nothing here is looked up globally.

use crate::composite::{CombineUniforms, CompositeFeatures};
use crate::error::Horizon3dResult;

const LOG_SOURCE: &str = "horizon3d::Config";

/// Source of the configured base field of view, in degrees.
///
/// Read on demand: a camera pulls the value each time it needs it, so a
/// changed setting takes effect on the next `extend_fov` / `reset_fov`.
pub trait FovProvider {
    /// Base field of view in degrees
    fn field_of_view(&self) -> f32;
}

/// Rendering settings consumed by the camera and the combine pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderingConfig {
    /// Base vertical field of view in degrees, in (0, 180)
    pub field_of_view: f32,
    /// Modulate opaque color by the ambient occlusion buffer
    pub ssao: bool,
    /// Draw black outlines along depth discontinuities
    pub outline: bool,
    /// Outline blend weight, >= 0
    pub outline_thickness: f32,
    /// Edge value above which a fragment is outlined, >= 0
    pub outline_depth_threshold: f32,
}

impl RenderingConfig {
    /// Exclusive lower bound of the field of view
    pub const MIN_FIELD_OF_VIEW: f32 = 0.0;
    /// Exclusive upper bound of the field of view
    pub const MAX_FIELD_OF_VIEW: f32 = 180.0;

    /// Default settings with the given field of view, validated
    pub fn with_field_of_view(field_of_view: f32) -> Horizon3dResult<Self> {
        let config = Self {
            field_of_view,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field, logging and returning the first violation
    pub fn validate(&self) -> Horizon3dResult<()> {
        if !self.field_of_view.is_finite()
            || self.field_of_view <= Self::MIN_FIELD_OF_VIEW
            || self.field_of_view >= Self::MAX_FIELD_OF_VIEW
        {
            crate::engine_bail!(LOG_SOURCE, InvalidConfig,
                "field_of_view {} must be in ({}, {})",
                self.field_of_view, Self::MIN_FIELD_OF_VIEW, Self::MAX_FIELD_OF_VIEW);
        }
        if self.outline_thickness.is_nan() || self.outline_thickness < 0.0 {
            crate::engine_bail!(LOG_SOURCE, InvalidConfig,
                "outline_thickness {} must be >= 0", self.outline_thickness);
        }
        if self.outline_depth_threshold.is_nan() || self.outline_depth_threshold < 0.0 {
            crate::engine_bail!(LOG_SOURCE, InvalidConfig,
                "outline_depth_threshold {} must be >= 0", self.outline_depth_threshold);
        }
        Ok(())
    }

    /// Combine pass features enabled by this configuration
    pub fn composite_features(&self) -> CompositeFeatures {
        let mut features = CompositeFeatures::empty();
        features.set(CompositeFeatures::SSAO, self.ssao);
        features.set(CompositeFeatures::OUTLINE, self.outline);
        features
    }

    /// Uniform values for the combine pass
    pub fn combine_uniforms(&self) -> CombineUniforms {
        CombineUniforms {
            outline_depth_threshold: self.outline_depth_threshold,
            outline_thickness: self.outline_thickness,
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            field_of_view: 90.0,
            ssao: false,
            outline: false,
            outline_thickness: 1.0,
            outline_depth_threshold: 0.05,
        }
    }
}

impl FovProvider for RenderingConfig {
    fn field_of_view(&self) -> f32 {
        self.field_of_view
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
