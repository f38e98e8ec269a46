/// Binding resources and the host-supplied binding table
///
/// A BoundResources table maps (set, binding) pairs to concrete host
/// resources for the duration of a dispatch. It is validated against a
/// stage's declared binding slots before any invocation runs; reserved
/// (declared-but-unused) slots are validated exactly like used ones, since
/// the host contract does not distinguish them.

use rustc_hash::FxHashMap;

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::stage::interface::{BindingSlot, BindingType};

/// A concrete resource bound at a (set, binding) slot
pub enum BindingResource<'a> {
    /// Uniform buffer binding
    UniformBuffer(&'a dyn Buffer),
    /// Storage buffer binding
    StorageBuffer(&'a dyn Buffer),
}

impl<'a> BindingResource<'a> {
    /// The binding type this resource satisfies
    pub fn binding_type(&self) -> BindingType {
        match self {
            BindingResource::UniformBuffer(_) => BindingType::UniformBuffer,
            BindingResource::StorageBuffer(_) => BindingType::StorageBuffer,
        }
    }

    /// The underlying buffer
    pub fn buffer(&self) -> &'a dyn Buffer {
        match self {
            BindingResource::UniformBuffer(buffer) => *buffer,
            BindingResource::StorageBuffer(buffer) => *buffer,
        }
    }
}

/// Host-supplied binding table for one dispatch
///
/// Extra entries beyond what a stage declares are permitted (a host may
/// share one table across several pipelines); missing or non-conforming
/// entries for declared slots are not.
#[derive(Default)]
pub struct BoundResources<'a> {
    entries: FxHashMap<(u32, u32), BindingResource<'a>>,
}

impl<'a> BoundResources<'a> {
    /// Create an empty binding table
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Bind a resource at (set, binding), replacing any previous entry
    pub fn bind(&mut self, set: u32, binding: u32, resource: BindingResource<'a>) {
        self.entries.insert((set, binding), resource);
    }

    /// Resource bound at (set, binding), if any
    pub fn get(&self, set: u32, binding: u32) -> Option<&BindingResource<'a>> {
        self.entries.get(&(set, binding))
    }

    /// Number of bound resources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate this table against a stage's declared binding slots
    ///
    /// Checks, for every declared slot: an entry exists, its type matches,
    /// and its buffer meets the slot's minimum size.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBinding` describing the first violation.
    pub fn validate_against(&self, slots: &[BindingSlot]) -> Result<()> {
        for slot in slots {
            let resource = self.get(slot.set, slot.binding).ok_or_else(|| {
                Error::InvalidBinding(format!(
                    "no resource bound at set {} binding {}",
                    slot.set, slot.binding
                ))
            })?;

            if resource.binding_type() != slot.binding_type {
                return Err(Error::InvalidBinding(format!(
                    "set {} binding {} expects {:?} but a {:?} resource is bound",
                    slot.set,
                    slot.binding,
                    slot.binding_type,
                    resource.binding_type()
                )));
            }

            let size = resource.buffer().size();
            if size < slot.min_size_bytes {
                return Err(Error::InvalidBinding(format!(
                    "set {} binding {} requires at least {} bytes but the bound buffer has {}",
                    slot.set, slot.binding, slot.min_size_bytes, size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
