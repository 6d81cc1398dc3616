//! Data model for the glossary filter
//!
//! Items and letter rules, configuration, and the reports handed back to the
//! host page.

pub mod config;
pub mod item;
pub mod stats;

pub use config::FilterConfig;
pub use item::{alphabet, compare_titles, first_letter, normalize, Item};
pub use stats::{FilterStats, SyncReport};
