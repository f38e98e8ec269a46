/// Fragment pipeline linking - construction-time contract validation
///
/// `FragmentPipeline::link` is where the stage contract meets the rest of
/// the pipeline. Everything that can be checked without concrete resources
/// is checked here: interface self-consistency, upstream outputs against
/// stage inputs, stage outputs against the color target format. Binding
/// resources are supplied per dispatch and validated there.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::stage::fragment::FragmentStage;
use crate::stage::interface::{AttributeFormat, OutputAttribute};

/// Descriptor for linking a fragment pipeline
#[derive(Clone)]
pub struct FragmentPipelineDesc {
    /// Outputs of the upstream (vertex/interpolation) stage, as the
    /// pipeline wires them
    pub upstream_outputs: Vec<OutputAttribute>,
    /// The fragment stage to link
    pub stage: Arc<dyn FragmentStage>,
    /// Format of the active color target, at output location 0
    pub color_target_format: AttributeFormat,
}

/// A linked fragment pipeline
///
/// Holds the stage plus the wiring it was validated against. Once linked,
/// dispatching only needs the per-draw pieces: the fragment stream, the
/// binding table, and the target.
pub struct FragmentPipeline {
    stage: Arc<dyn FragmentStage>,
    upstream_outputs: Vec<OutputAttribute>,
    color_target_format: AttributeFormat,
}

impl FragmentPipeline {
    /// Link a fragment pipeline, validating the whole stage contract
    ///
    /// Checks performed, in order:
    /// 1. the stage interface is self-consistent;
    /// 2. every stage input is fed by an upstream output of the same
    ///    location and format;
    /// 3. every stage output targets the single active color attachment at
    ///    location 0, with a matching format.
    ///
    /// # Errors
    ///
    /// Returns `Error::InterfaceMismatch` describing the first violation.
    pub fn link(desc: FragmentPipelineDesc) -> Result<Self> {
        let interface = desc.stage.interface();

        interface.validate()?;
        interface.link_inputs(&desc.upstream_outputs)?;

        for output in &interface.outputs {
            if output.location != 0 {
                return Err(Error::InterfaceMismatch(format!(
                    "stage writes output location {} but only location 0 has a color target",
                    output.location
                )));
            }
            if output.format != desc.color_target_format {
                return Err(Error::InterfaceMismatch(format!(
                    "stage output format {:?} does not match color target format {:?}",
                    output.format, desc.color_target_format
                )));
            }
        }

        crate::vela_debug!(
            "vela::pipeline",
            "linked fragment pipeline: {} inputs, {} outputs, {} binding slots",
            interface.inputs.len(),
            interface.outputs.len(),
            interface.bindings.len()
        );

        Ok(Self {
            stage: desc.stage,
            upstream_outputs: desc.upstream_outputs,
            color_target_format: desc.color_target_format,
        })
    }

    /// The linked fragment stage
    pub fn stage(&self) -> &Arc<dyn FragmentStage> {
        &self.stage
    }

    /// Upstream outputs the pipeline was linked against
    pub fn upstream_outputs(&self) -> &[OutputAttribute] {
        &self.upstream_outputs
    }

    /// Format of the active color target
    pub fn color_target_format(&self) -> AttributeFormat {
        self.color_target_format
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
