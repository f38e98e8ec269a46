/// Stage module - shader-stage contract types and stage implementations

// Module declarations
pub mod interface;
pub mod fragment;

// Re-export everything from interface.rs
pub use interface::*;

// Re-export from fragment.rs
pub use fragment::*;
