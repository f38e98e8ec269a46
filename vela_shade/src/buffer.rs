/// Buffer trait and buffer descriptor
///
/// Host-owned memory resources that stages reference through binding slots.
/// Concrete implementations live in executor backends; the core only
/// defines the access contract.

use glam::Vec4;

use crate::error::Result;

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uniform/constant buffer (read-only structured data)
    Uniform,
    /// Storage buffer
    Storage,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., CpuBuffer).
/// Buffers are internally synchronized; a host thread may update one
/// between dispatches. Not mutating a bound buffer while a dispatch may
/// read it is the host's contract.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Read buffer data into `dest`
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `dest` - Destination slice, filled entirely
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` when the range falls outside the
    /// buffer.
    fn read(&self, offset: u64, dest: &mut [u8]) -> Result<()>;

    /// Update buffer data
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` when the range falls outside the
    /// buffer.
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}

/// Read one packed color vector from a buffer
///
/// The layout is a single packed vec4: four f32 components, 16 bytes, no
/// padding. This is the layout the host writes into color buffer bindings.
///
/// # Errors
///
/// Returns `Error::InvalidResource` when fewer than 16 bytes are available
/// at `offset`.
pub fn read_packed_color(buffer: &dyn Buffer, offset: u64) -> Result<Vec4> {
    let mut bytes = [0u8; 16];
    buffer.read(offset, &mut bytes)?;
    Ok(bytemuck::pod_read_unaligned(&bytes))
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
