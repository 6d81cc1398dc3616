//! Glossary filter WASM API
//!
//! This module provides the JavaScript-facing API: the `AlphabeticalFilter`
//! class, the browser event wiring behind it, and shared helpers for
//! logging, serialization and error conversion.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serde helpers, error conversion
//! - `bindings`: event listeners, timers and the mutation-observer adapter
//! - `filter`: the exported `AlphabeticalFilter` class

pub mod bindings;
pub mod filter;
pub mod helpers;

pub use filter::{AlphabeticalFilterHandle, READY_EVENT};
