/// Mock types for unit tests (no backend required)
///
/// These mocks allow testing pipelines, bindings, and the engine singleton
/// without pulling in an executor backend.

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use glam::Vec4;

#[cfg(test)]
use crate::binding::BoundResources;
#[cfg(test)]
use crate::buffer::Buffer;
#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use crate::executor::{DispatchStats, ExecutorStats, FragmentStream, StageExecutor};
#[cfg(test)]
use crate::pipeline::FragmentPipeline;
#[cfg(test)]
use crate::stage::fragment::{FragmentInput, FragmentStage};
#[cfg(test)]
use crate::stage::interface::StageInterface;
#[cfg(test)]
use crate::target::ColorTarget;

// ============================================================================
// Mock Stage
// ============================================================================

/// Fragment stage with a caller-supplied interface that returns a constant
/// color and records how often it was invoked
#[cfg(test)]
pub struct MockStage {
    pub interface: StageInterface,
    pub output: Vec4,
    pub invocations: Mutex<u64>,
}

#[cfg(test)]
impl MockStage {
    pub fn new(interface: StageInterface, output: Vec4) -> Self {
        Self {
            interface,
            output,
            invocations: Mutex::new(0),
        }
    }

    pub fn invocation_count(&self) -> u64 {
        *self.invocations.lock().unwrap()
    }
}

#[cfg(test)]
impl FragmentStage for MockStage {
    fn interface(&self) -> &StageInterface {
        &self.interface
    }

    fn shade(&self, _input: &FragmentInput<'_>, _resources: &BoundResources<'_>) -> Vec4 {
        *self.invocations.lock().unwrap() += 1;
        self.output
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

/// In-memory buffer backed by a plain byte vector
#[cfg(test)]
#[derive(Debug)]
pub struct MockBuffer {
    pub data: Mutex<Vec<u8>>,
}

#[cfg(test)]
impl MockBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            data: Mutex::new(vec![0u8; size]),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            data: Mutex::new(bytes),
        }
    }
}

#[cfg(test)]
impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.data.lock().unwrap().len() as u64
    }

    fn read(&self, offset: u64, dest: &mut [u8]) -> Result<()> {
        let data = self.data.lock().unwrap();
        let start = offset as usize;
        let end = start + dest.len();
        if end > data.len() {
            return Err(Error::InvalidResource(format!(
                "read of {} bytes at offset {} exceeds buffer size {}",
                dest.len(),
                offset,
                data.len()
            )));
        }
        dest.copy_from_slice(&data[start..end]);
        Ok(())
    }

    fn update(&self, offset: u64, bytes: &[u8]) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        let start = offset as usize;
        let end = start + bytes.len();
        if end > data.len() {
            return Err(Error::InvalidResource(format!(
                "update of {} bytes at offset {} exceeds buffer size {}",
                bytes.len(),
                offset,
                data.len()
            )));
        }
        data[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// Mock Executor
// ============================================================================

/// Executor that shades nothing and only counts dispatches
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockExecutor {
    pub dispatches: u64,
}

#[cfg(test)]
impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl StageExecutor for MockExecutor {
    fn name(&self) -> &str {
        "mock"
    }

    fn dispatch(
        &mut self,
        _pipeline: &FragmentPipeline,
        stream: &FragmentStream,
        _resources: &BoundResources<'_>,
        _target: &mut ColorTarget,
    ) -> Result<DispatchStats> {
        self.dispatches += 1;
        Ok(DispatchStats {
            fragments_shaded: stream.len() as u64,
        })
    }

    fn stats(&self) -> ExecutorStats {
        ExecutorStats {
            dispatches: self.dispatches,
            fragments_shaded: 0,
        }
    }
}
