/// StageExecutor trait and the fragment stream
///
/// An executor is the surrounding pipeline's dispatch machinery: it drives
/// a linked fragment stage once per fragment record and writes results to
/// the color target. Invocations are logically independent - no ordering
/// is observable, nothing flows between them, and bound resources are
/// shared read-only for the duration of a dispatch.

use glam::Vec4;

use crate::binding::BoundResources;
use crate::error::{Error, Result};
use crate::pipeline::FragmentPipeline;
use crate::stage::interface::InputAttribute;
use crate::target::ColorTarget;

/// One rasterized fragment: its target position plus the interpolated
/// attribute values the upstream pipeline produced for it
#[derive(Debug, Clone)]
pub struct FragmentRecord {
    /// Target x coordinate
    pub x: u32,
    /// Target y coordinate
    pub y: u32,
    /// Attribute values, parallel to the stream's location list
    pub values: Vec<Vec4>,
}

/// A stream of fragments for one dispatch
///
/// The stream fixes the set of attribute locations once; every record then
/// carries exactly one value per location. This mirrors how interpolated
/// attributes arrive from a rasterizer: same layout for every fragment of
/// a draw.
#[derive(Debug, Clone)]
pub struct FragmentStream {
    locations: Vec<u32>,
    records: Vec<FragmentRecord>,
}

impl FragmentStream {
    /// Create an empty stream carrying attributes at `locations`
    pub fn new(locations: Vec<u32>) -> Self {
        Self {
            locations,
            records: Vec::new(),
        }
    }

    /// Append one fragment
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` when `values` does not carry exactly
    /// one value per stream location.
    pub fn push(&mut self, x: u32, y: u32, values: Vec<Vec4>) -> Result<()> {
        if values.len() != self.locations.len() {
            return Err(Error::InvalidResource(format!(
                "fragment ({}, {}) carries {} attribute values but the stream declares {} locations",
                x,
                y,
                values.len(),
                self.locations.len()
            )));
        }
        self.records.push(FragmentRecord { x, y, values });
        Ok(())
    }

    /// Attribute locations carried by every record
    pub fn locations(&self) -> &[u32] {
        &self.locations
    }

    /// The fragment records
    pub fn records(&self) -> &[FragmentRecord] {
        &self.records
    }

    /// Number of fragments
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the stream holds no fragments
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check that the stream supplies every declared stage input
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` for the first input location the
    /// stream does not carry.
    pub fn validate_covers(&self, inputs: &[InputAttribute]) -> Result<()> {
        for input in inputs {
            if !self.locations.contains(&input.location) {
                return Err(Error::InvalidResource(format!(
                    "stream does not supply stage input at location {}",
                    input.location
                )));
            }
        }
        Ok(())
    }
}

/// Statistics for a single dispatch
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchStats {
    /// Number of fragment-shading invocations executed
    pub fragments_shaded: u64,
}

/// Cumulative executor statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutorStats {
    /// Number of dispatches executed
    pub dispatches: u64,
    /// Total fragment-shading invocations across all dispatches
    pub fragments_shaded: u64,
}

/// Stage executor trait
///
/// Implemented by backend-specific executors (e.g., CpuExecutor). A
/// dispatch either validates everything up front and runs every invocation,
/// or rejects before the first invocation; there is no partial failure
/// surfaced mid-draw.
pub trait StageExecutor: Send + Sync {
    /// Backend name (e.g., "cpu")
    fn name(&self) -> &str;

    /// Execute one dispatch: one stage invocation per stream record
    ///
    /// # Arguments
    ///
    /// * `pipeline` - A linked fragment pipeline
    /// * `stream` - Fragments to shade
    /// * `resources` - Host binding table, validated against the stage's
    ///   declared slots before any invocation
    /// * `target` - Color target receiving the outputs
    fn dispatch(
        &mut self,
        pipeline: &FragmentPipeline,
        stream: &FragmentStream,
        resources: &BoundResources<'_>,
        target: &mut ColorTarget,
    ) -> Result<DispatchStats>;

    /// Cumulative statistics for this executor
    fn stats(&self) -> ExecutorStats;
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
