/*!
# Vela Shade - CPU Executor Backend

Software implementation of the Vela fragment-shading execution contract.

This crate provides a CPU executor that implements the vela_shade traits:
it validates the dispatch (stream coverage, binding conformance, fragment
bounds) before any invocation, then drives the fragment stage once per
stream record and writes results into the color target. It also provides
`CpuBuffer`, the concrete host buffer used for resource bindings.

The optional `binding-audit` feature snapshots every read-only binding
around a dispatch and turns a mutation into an `InvalidBinding` error.
*/

// CPU implementation modules
mod cpu_executor;
mod cpu_buffer;

pub use cpu_executor::{CpuExecutor, CpuExecutorConfig};
pub use cpu_buffer::CpuBuffer;
