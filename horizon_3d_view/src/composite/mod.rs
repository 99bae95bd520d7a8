//! Composite module - the pass merging opaque and transparent scene buffers.
//!
//! `combine()` is the CPU reference of `shaders/combine.frag`; both must
//! agree fragment for fragment.

mod combine;

pub use combine::{
    combine, combine_fragment_source,
    CombineOutput, CombineSample, CombineUniforms, CompositeFeatures,
    COMBINE_FRAGMENT_SOURCE, GLSL_VERSION, OUTLINE_COLOR,
};
