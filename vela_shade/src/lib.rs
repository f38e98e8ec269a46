/*!
# Vela Shade

Core traits and types for the Vela fragment-shading system.

This crate provides the platform-agnostic contract of a fragment-processing
stage inside a rasterization pipeline: the typed stage boundary (input and
output attribute slots, resource binding slots), pipeline-construction-time
contract validation, the host resource model, and the execution trait.
Executor backends implement the traits and drive a stage once per fragment.

## Architecture

- **StageInterface**: the declared boundary of a shader stage
- **FragmentStage**: one `shade` call per fragment-shading invocation
- **PassthroughFragmentStage**: identity copy from input location 0 to
  output location 0, with a reserved (declared-but-unused) buffer binding
- **FragmentPipeline**: links upstream outputs, stage, and target format,
  rejecting contract mismatches before any invocation
- **BoundResources**: the host's (set, binding) → resource table
- **StageExecutor**: dispatch machinery, implemented by backends

Backend implementations provide concrete executors and buffers.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod stage;
pub mod buffer;
pub mod binding;
pub mod pipeline;
pub mod target;
pub mod executor;

#[cfg(test)]
pub(crate) mod mock;

// Main vela namespace module
pub mod vela {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: vela_* macros are NOT re-exported here - they live at the crate root
    }

    // Stage sub-module with the contract types
    pub mod stage {
        pub use crate::stage::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::binding::*;
        pub use crate::buffer::*;
    }

    // Render sub-module: pipeline, stream, target, executor
    pub mod render {
        pub use crate::executor::*;
        pub use crate::pipeline::*;
        pub use crate::target::*;
    }
}

// Re-export math library at crate root
pub use glam;
