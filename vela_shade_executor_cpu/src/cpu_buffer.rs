/// CpuBuffer - host-visible buffer backed by system memory
///
/// The concrete Buffer implementation for software execution. Internally
/// synchronized so a host thread may update contents between dispatches.

use std::sync::Mutex;

use vela_shade::glam::Vec4;
use vela_shade::vela::resource::{Buffer, BufferDesc, BufferUsage};
use vela_shade::vela::{Error, Result};

/// Host-visible buffer backed by a byte vector
#[derive(Debug)]
pub struct CpuBuffer {
    data: Mutex<Vec<u8>>,
    usage: BufferUsage,
}

impl CpuBuffer {
    /// Create a zero-filled buffer from a descriptor
    pub fn new(desc: BufferDesc) -> Self {
        Self {
            data: Mutex::new(vec![0u8; desc.size as usize]),
            usage: desc.usage,
        }
    }

    /// Create a uniform buffer holding one packed vec4
    ///
    /// The layout matches what the passthrough stage declares at its
    /// reserved slot: four f32 components, 16 bytes, no padding.
    pub fn from_color(color: Vec4) -> Self {
        Self {
            data: Mutex::new(bytemuck::bytes_of(&color).to_vec()),
            usage: BufferUsage::Uniform,
        }
    }

    /// Buffer usage
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Copy of the entire buffer contents
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl Buffer for CpuBuffer {
    fn size(&self) -> u64 {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len() as u64
    }

    fn read(&self, offset: u64, dest: &mut [u8]) -> Result<()> {
        let data = self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let start = offset as usize;
        let end = start.checked_add(dest.len()).ok_or_else(|| {
            Error::InvalidResource("buffer read range overflows".to_string())
        })?;
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
        let mut data = self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let start = offset as usize;
        let end = start.checked_add(bytes.len()).ok_or_else(|| {
            Error::InvalidResource("buffer update range overflows".to_string())
        })?;
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
