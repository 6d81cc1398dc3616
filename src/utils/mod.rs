//! Utility modules for the glossary filter
//!
//! Timing and event coalescing helpers shared by the engine and the
//! browser bindings.

pub mod debounce;
pub mod performance;

// Re-export commonly used types
pub use debounce::*;
pub use performance::*;
