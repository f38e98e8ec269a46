/// Stage interface model - the typed boundary of a shader stage
///
/// A StageInterface describes everything the surrounding pipeline needs to
/// know to wire a stage in: input attributes (with interpolation
/// qualifiers), output attributes, and resource binding slots. The fixed
/// location/set/binding indices live here as data, so contract mismatches
/// are caught when a pipeline is linked rather than at dispatch time.

use crate::error::{Error, Result};

/// Attribute data format (data type and component count)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum AttributeFormat {
    /// One 32-bit float
    R32_SFLOAT,
    /// Two 32-bit floats
    R32G32_SFLOAT,
    /// Three 32-bit floats
    R32G32B32_SFLOAT,
    /// Four 32-bit floats
    R32G32B32A32_SFLOAT,
}

impl AttributeFormat {
    /// Size in bytes of one attribute of this format
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * 4
    }

    /// Number of float components
    pub fn component_count(&self) -> u32 {
        match self {
            AttributeFormat::R32_SFLOAT => 1,
            AttributeFormat::R32G32_SFLOAT => 2,
            AttributeFormat::R32G32B32_SFLOAT => 3,
            AttributeFormat::R32G32B32A32_SFLOAT => 4,
        }
    }
}

/// Interpolation qualifier for a fragment-stage input attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Perspective-correct interpolation (the default for color attributes)
    Perspective,
    /// Linear (no perspective correction)
    Linear,
    /// No interpolation, value taken from the provoking vertex
    Flat,
}

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment/Pixel stage
    Fragment,
    /// Compute stage
    Compute,
}

bitflags::bitflags! {
    /// Shader stage visibility flags for a binding slot
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StageVisibility: u32 {
        const VERTEX = 1 << 0;
        const FRAGMENT = 1 << 1;
        const COMPUTE = 1 << 2;
    }
}

impl StageVisibility {
    /// Create from a slice of ShaderStage
    pub fn from_stages(stages: &[ShaderStage]) -> Self {
        let mut flags = StageVisibility::empty();
        for stage in stages {
            flags |= match stage {
                ShaderStage::Vertex => StageVisibility::VERTEX,
                ShaderStage::Fragment => StageVisibility::FRAGMENT,
                ShaderStage::Compute => StageVisibility::COMPUTE,
            };
        }
        flags
    }
}

/// Input attribute description (interpolated per-fragment value)
#[derive(Debug, Clone, Copy)]
pub struct InputAttribute {
    /// Attribute location (corresponds to `layout(location = N) in`)
    pub location: u32,
    /// Format of the attribute
    pub format: AttributeFormat,
    /// Interpolation qualifier applied by the upstream pipeline
    pub interpolation: Interpolation,
}

/// Output attribute description
#[derive(Debug, Clone, Copy)]
pub struct OutputAttribute {
    /// Attribute location (corresponds to `layout(location = N) out`)
    pub location: u32,
    /// Format of the attribute
    pub format: AttributeFormat,
}

/// Type of resource expected at a binding slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// Storage buffer
    StorageBuffer,
}

/// Access the stage declares on a binding slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAccess {
    /// The stage may only read through this binding
    ReadOnly,
    /// The stage may read and write through this binding
    ReadWrite,
}

/// Description of a single resource binding slot
///
/// A slot with `used: false` is a reserved slot: the stage declares it and
/// the host must still bind a conforming resource, but the stage never reads
/// it. Removing such a slot breaks host-side binding setup, so it is carried
/// explicitly rather than left to look like dead data.
#[derive(Debug, Clone, Copy)]
pub struct BindingSlot {
    /// Resource-set index (corresponds to `layout(set = N)`)
    pub set: u32,
    /// Binding index within the set (corresponds to `layout(binding = N)`)
    pub binding: u32,
    /// Type of resource at this slot
    pub binding_type: BindingType,
    /// Access the stage declares on the slot
    pub access: BindingAccess,
    /// Shader stages that see this slot
    pub visibility: StageVisibility,
    /// Minimum size in bytes of a conforming resource
    pub min_size_bytes: u64,
    /// Whether the stage actually reads the slot
    pub used: bool,
}

/// The complete declared boundary of a shader stage
#[derive(Debug, Clone)]
pub struct StageInterface {
    /// Stage type
    pub stage: ShaderStage,
    /// Input attributes
    pub inputs: Vec<InputAttribute>,
    /// Output attributes
    pub outputs: Vec<OutputAttribute>,
    /// Resource binding slots
    pub bindings: Vec<BindingSlot>,
}

impl StageInterface {
    /// Check the interface for internal consistency
    ///
    /// Rejects duplicate input locations, duplicate output locations,
    /// duplicate (set, binding) pairs, and zero-sized buffer slots.
    ///
    /// # Errors
    ///
    /// Returns `Error::InterfaceMismatch` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        for (i, input) in self.inputs.iter().enumerate() {
            if self.inputs[..i].iter().any(|other| other.location == input.location) {
                return Err(Error::InterfaceMismatch(format!(
                    "duplicate input attribute at location {}",
                    input.location
                )));
            }
        }

        for (i, output) in self.outputs.iter().enumerate() {
            if self.outputs[..i].iter().any(|other| other.location == output.location) {
                return Err(Error::InterfaceMismatch(format!(
                    "duplicate output attribute at location {}",
                    output.location
                )));
            }
        }

        for (i, slot) in self.bindings.iter().enumerate() {
            if self.bindings[..i]
                .iter()
                .any(|other| other.set == slot.set && other.binding == slot.binding)
            {
                return Err(Error::InterfaceMismatch(format!(
                    "duplicate binding slot at set {} binding {}",
                    slot.set, slot.binding
                )));
            }
            if slot.min_size_bytes == 0 {
                return Err(Error::InterfaceMismatch(format!(
                    "binding slot at set {} binding {} declares a zero minimum size",
                    slot.set, slot.binding
                )));
            }
        }

        Ok(())
    }

    /// Check this stage's inputs against the outputs of the upstream stage
    ///
    /// Every input must be fed by an upstream output with the same location
    /// and the same format; the pipeline's interpolation step carries the
    /// value across, it never converts formats.
    ///
    /// # Errors
    ///
    /// Returns `Error::InterfaceMismatch` for the first unmatched input.
    pub fn link_inputs(&self, upstream_outputs: &[OutputAttribute]) -> Result<()> {
        for input in &self.inputs {
            let upstream = upstream_outputs
                .iter()
                .find(|output| output.location == input.location);

            match upstream {
                None => {
                    return Err(Error::InterfaceMismatch(format!(
                        "input at location {} has no upstream output",
                        input.location
                    )));
                }
                Some(output) if output.format != input.format => {
                    return Err(Error::InterfaceMismatch(format!(
                        "input at location {} expects {:?} but upstream supplies {:?}",
                        input.location, input.format, output.format
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Look up a binding slot by (set, binding)
    pub fn binding_slot(&self, set: u32, binding: u32) -> Option<&BindingSlot> {
        self.bindings
            .iter()
            .find(|slot| slot.set == set && slot.binding == binding)
    }
}

#[cfg(test)]
#[path = "interface_tests.rs"]
mod tests;
