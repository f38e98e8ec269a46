/// CpuExecutor - software implementation of the StageExecutor trait
///
/// Drives a linked fragment pipeline on the CPU: validates the dispatch up
/// front, then invokes the stage once per fragment record and writes each
/// result into the color target. Invocations observe nothing of one
/// another; record order is an implementation detail, not a contract.

use vela_shade::vela::render::{
    ColorTarget, DispatchStats, ExecutorStats, FragmentPipeline, FragmentStream, StageExecutor,
};
use vela_shade::vela::resource::BoundResources;
use vela_shade::vela::stage::FragmentInput;
use vela_shade::vela::{Error, Result};
use vela_shade::{vela_debug, vela_warn};

#[cfg(feature = "binding-audit")]
use vela_shade::vela::stage::{BindingAccess, StageInterface};
#[cfg(feature = "binding-audit")]
use vela_shade::vela_err;

/// CPU executor configuration
#[derive(Debug, Clone)]
pub struct CpuExecutorConfig {
    /// Enable dispatch validation (stream coverage, binding conformance,
    /// target format). Fragment bounds are always checked regardless.
    pub enable_validation: bool,
    /// Executor label used in logs
    pub label: String,
}

impl Default for CpuExecutorConfig {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            label: "Vela CPU Executor".to_string(),
        }
    }
}

/// Software stage executor
pub struct CpuExecutor {
    config: CpuExecutorConfig,
    stats: ExecutorStats,
}

impl CpuExecutor {
    /// Create a CPU executor
    ///
    /// # Arguments
    ///
    /// * `config` - Executor configuration
    pub fn new(config: CpuExecutorConfig) -> Self {
        vela_debug!(
            "vela::cpu",
            "created executor '{}' (validation: {})",
            config.label,
            config.enable_validation
        );
        Self {
            config,
            stats: ExecutorStats::default(),
        }
    }

    /// Executor configuration
    pub fn config(&self) -> &CpuExecutorConfig {
        &self.config
    }

    /// Validate everything that must hold before the first invocation
    fn validate_dispatch(
        &self,
        pipeline: &FragmentPipeline,
        stream: &FragmentStream,
        resources: &BoundResources<'_>,
        target: &ColorTarget,
    ) -> Result<()> {
        let interface = pipeline.stage().interface();

        if self.config.enable_validation {
            stream.validate_covers(&interface.inputs)?;
            resources.validate_against(&interface.bindings)?;

            if target.format() != pipeline.color_target_format() {
                return Err(Error::InterfaceMismatch(format!(
                    "pipeline was linked against target format {:?} but the bound target is {:?}",
                    pipeline.color_target_format(),
                    target.format()
                )));
            }

            if resources.len() > interface.bindings.len() {
                vela_warn!(
                    "vela::cpu",
                    "{} resources bound, stage declares {} slots",
                    resources.len(),
                    interface.bindings.len()
                );
            }
        }

        // Positions are rejected up front so a bad record cannot surface
        // mid-draw after some fragments were already shaded.
        for record in stream.records() {
            if record.x >= target.width() || record.y >= target.height() {
                return Err(Error::InvalidResource(format!(
                    "fragment ({}, {}) outside {}x{} target",
                    record.x,
                    record.y,
                    target.width(),
                    target.height()
                )));
            }
        }

        Ok(())
    }
}

impl StageExecutor for CpuExecutor {
    fn name(&self) -> &str {
        "cpu"
    }

    fn dispatch(
        &mut self,
        pipeline: &FragmentPipeline,
        stream: &FragmentStream,
        resources: &BoundResources<'_>,
        target: &mut ColorTarget,
    ) -> Result<DispatchStats> {
        self.validate_dispatch(pipeline, stream, resources, target)?;

        #[cfg(feature = "binding-audit")]
        let snapshots = audit::snapshot_read_only(pipeline.stage().interface(), resources)?;

        let stage = pipeline.stage();
        let locations = stream.locations();
        for record in stream.records() {
            let input = FragmentInput::new(locations, &record.values);
            let color = stage.shade(&input, resources);
            target.put(record.x, record.y, color);
        }

        #[cfg(feature = "binding-audit")]
        audit::verify_unchanged(pipeline.stage().interface(), resources, &snapshots)?;

        let dispatch_stats = DispatchStats {
            fragments_shaded: stream.len() as u64,
        };
        self.stats.dispatches += 1;
        self.stats.fragments_shaded += dispatch_stats.fragments_shaded;

        vela_debug!(
            "vela::cpu",
            "dispatch complete: {} fragments shaded",
            dispatch_stats.fragments_shaded
        );

        Ok(dispatch_stats)
    }

    fn stats(&self) -> ExecutorStats {
        self.stats
    }
}

/// Read-only binding audit
///
/// Snapshots the contents of every buffer bound at a read-only slot before
/// a dispatch and verifies them afterwards. A mutation means some stage
/// wrote through a binding it declared read-only.
#[cfg(feature = "binding-audit")]
mod audit {
    use super::*;

    pub(super) type Snapshot = Vec<((u32, u32), Vec<u8>)>;

    pub(super) fn snapshot_read_only(
        interface: &StageInterface,
        resources: &BoundResources<'_>,
    ) -> Result<Snapshot> {
        let mut snapshots = Vec::new();
        for slot in &interface.bindings {
            if slot.access != BindingAccess::ReadOnly {
                continue;
            }
            // Validation may be disabled; an absent binding is not the
            // audit's finding to report.
            let Some(resource) = resources.get(slot.set, slot.binding) else {
                continue;
            };
            let buffer = resource.buffer();
            let mut bytes = vec![0u8; buffer.size() as usize];
            buffer
                .read(0, &mut bytes)
                .map_err(|e| vela_err!("vela::cpu", "audit snapshot read failed: {}", e))?;
            snapshots.push(((slot.set, slot.binding), bytes));
        }
        Ok(snapshots)
    }

    pub(super) fn verify_unchanged(
        _interface: &StageInterface,
        resources: &BoundResources<'_>,
        snapshots: &Snapshot,
    ) -> Result<()> {
        for ((set, binding), before) in snapshots {
            let Some(resource) = resources.get(*set, *binding) else {
                continue;
            };
            let buffer = resource.buffer();
            let mut after = vec![0u8; buffer.size() as usize];
            buffer
                .read(0, &mut after)
                .map_err(|e| vela_err!("vela::cpu", "audit verify read failed: {}", e))?;
            if &after != before {
                return Err(Error::InvalidBinding(format!(
                    "read-only binding at set {} binding {} was mutated during dispatch",
                    set, binding
                )));
            }
        }
        Ok(())
    }
}
