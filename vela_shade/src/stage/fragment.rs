/// FragmentStage trait and the passthrough fragment stage
///
/// The passthrough stage copies the interpolated color at input location 0
/// to output location 0, untouched. It also declares a read-only color
/// buffer at (set 0, binding 0) that it never reads; hosts bind it anyway,
/// matching the contract the stage was deployed with.

use glam::Vec4;

use crate::binding::BoundResources;
use crate::stage::interface::{
    AttributeFormat, BindingAccess, BindingSlot, BindingType, InputAttribute, Interpolation,
    OutputAttribute, ShaderStage, StageInterface, StageVisibility,
};

// ===== PASSTHROUGH STAGE CONTRACT =====
//
// These indices are the statically agreed contract between the stage and
// the surrounding pipeline. Linking consumes them as data, so a host wired
// against different indices is rejected at pipeline-construction time.

/// Input attribute slot carrying the interpolated color
pub const COLOR_INPUT_LOCATION: u32 = 0;

/// Output attribute slot the color is written to
pub const COLOR_OUTPUT_LOCATION: u32 = 0;

/// Resource-set index of the declared color buffer
pub const COLOR_BUFFER_SET: u32 = 0;

/// Binding index of the declared color buffer
pub const COLOR_BUFFER_BINDING: u32 = 0;

/// Minimum size of the declared color buffer: one packed vec4
pub const COLOR_BUFFER_SIZE_BYTES: u64 = 16;

/// Per-invocation view of the interpolated input attributes
///
/// Values are supplied by the executor from the fragment stream; `locations`
/// and `values` are parallel slices. A linked pipeline guarantees every
/// declared input location is present.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput<'a> {
    locations: &'a [u32],
    values: &'a [Vec4],
}

impl<'a> FragmentInput<'a> {
    /// Create a fragment input view over parallel location/value slices
    pub fn new(locations: &'a [u32], values: &'a [Vec4]) -> Self {
        debug_assert_eq!(locations.len(), values.len());
        Self { locations, values }
    }

    /// Value of the attribute at `location`, if supplied
    pub fn attribute(&self, location: u32) -> Option<Vec4> {
        self.locations
            .iter()
            .position(|&l| l == location)
            .map(|index| self.values[index])
    }

    /// Number of supplied attributes
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when no attributes are supplied
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Fragment stage trait
///
/// One `shade` call per fragment-shading invocation. Implementations are
/// stateless with respect to invocations: no information flows between
/// calls, and bound resources are read-only unless the interface declares
/// otherwise. There is no error channel — a stage has no preconditions it
/// can check; contract violations are rejected by pipeline linking and
/// dispatch validation before any invocation runs.
pub trait FragmentStage: Send + Sync {
    /// The declared boundary of this stage
    fn interface(&self) -> &StageInterface;

    /// Shade one fragment
    ///
    /// # Arguments
    ///
    /// * `input` - interpolated attribute values for this invocation
    /// * `resources` - the host-supplied binding table
    fn shade(&self, input: &FragmentInput<'_>, resources: &BoundResources<'_>) -> Vec4;
}

/// Passthrough fragment stage
///
/// Writes its interpolated color input to the color output, verbatim:
/// no branching, no clamping, no transformation. Out-of-range and
/// non-finite components survive the copy.
pub struct PassthroughFragmentStage {
    interface: StageInterface,
}

impl PassthroughFragmentStage {
    /// Create the passthrough stage with its fixed contract
    pub fn new() -> Self {
        Self {
            interface: StageInterface {
                stage: ShaderStage::Fragment,
                inputs: vec![InputAttribute {
                    location: COLOR_INPUT_LOCATION,
                    format: AttributeFormat::R32G32B32A32_SFLOAT,
                    interpolation: Interpolation::Perspective,
                }],
                outputs: vec![OutputAttribute {
                    location: COLOR_OUTPUT_LOCATION,
                    format: AttributeFormat::R32G32B32A32_SFLOAT,
                }],
                bindings: vec![BindingSlot {
                    set: COLOR_BUFFER_SET,
                    binding: COLOR_BUFFER_BINDING,
                    binding_type: BindingType::UniformBuffer,
                    access: BindingAccess::ReadOnly,
                    visibility: StageVisibility::FRAGMENT,
                    min_size_bytes: COLOR_BUFFER_SIZE_BYTES,
                    // Reserved: declared so host binding setup stays valid,
                    // never read by this stage.
                    used: false,
                }],
            },
        }
    }
}

impl Default for PassthroughFragmentStage {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentStage for PassthroughFragmentStage {
    fn interface(&self) -> &StageInterface {
        &self.interface
    }

    fn shade(&self, input: &FragmentInput<'_>, _resources: &BoundResources<'_>) -> Vec4 {
        // Identity copy. A linked pipeline guarantees the input is present;
        // outside one, a missing attribute reads as zero.
        input.attribute(COLOR_INPUT_LOCATION).unwrap_or(Vec4::ZERO)
    }
}

#[cfg(test)]
#[path = "fragment_tests.rs"]
mod tests;
