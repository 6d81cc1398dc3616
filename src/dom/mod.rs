//! Host document abstraction
//!
//! The filter engine never talks to `web_sys` directly. Every DOM read and
//! write goes through [`HostDocument`], which is implemented by the browser
//! binding ([`WebDocument`]) and by an in-memory tree ([`MemoryDocument`])
//! that tests and native composers drive.
//!
//! # Module Structure
//!
//! - `selector`: the compound selector subset understood by the in-memory tree
//! - `memory`: `MemoryDocument`, an arena-backed document
//! - `web`: `WebDocument`, the `web-sys` binding

pub mod memory;
pub mod selector;
pub mod web;

pub use memory::{MemoryDocument, NodeId};
pub use selector::{selector_attribute_name, SimpleSelector};
pub use web::WebDocument;

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use crate::models::compare_titles;

/// Failures raised by structural DOM operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    /// A selector could not be parsed or evaluated
    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    /// The host refused a structural operation (insert, clone, create)
    #[error("DOM operation '{operation}' failed: {reason}")]
    Operation { operation: &'static str, reason: String },

    /// A node handle no longer refers to a live node
    #[error("Stale node handle: {0}")]
    StaleNode(String),
}

impl DomError {
    pub fn operation(operation: &'static str, reason: impl Into<String>) -> Self {
        DomError::Operation {
            operation,
            reason: reason.into(),
        }
    }
}

/// Capabilities the engine needs from the document it decorates
///
/// Reads are infallible and fall back to empty values, matching how the
/// browser reports missing attributes or styles. Structural writes return
/// `Result` so a failed insert can be reported instead of ignored.
pub trait HostDocument {
    /// Handle to an element of this document
    type Node: Clone + PartialEq + fmt::Debug;

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First element matching `selector`
    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// All descendants of `root` matching `selector`, in document order
    fn query_all_within(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `root` matching `selector`
    fn query_within(&self, root: &Self::Node, selector: &str) -> Option<Self::Node> {
        self.query_all_within(root, selector).into_iter().next()
    }

    /// Whether `node` itself matches `selector`
    fn matches(&self, node: &Self::Node, selector: &str) -> bool;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Upper-case tag name (`"A"`, `"DIV"`)
    fn tag_name(&self, node: &Self::Node) -> String;

    // ------------------------------------------------------------------
    // Content and attributes
    // ------------------------------------------------------------------

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn class_names(&self, node: &Self::Node) -> Vec<String>;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.class_names(node).iter().any(|c| c == class)
    }

    // ------------------------------------------------------------------
    // Styles and geometry
    // ------------------------------------------------------------------

    /// Inline style value (`""` when unset)
    fn inline_style(&self, node: &Self::Node, property: &str) -> String;

    /// Set an inline style; an empty value removes the property
    fn set_inline_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Resolved style value after host styling is applied
    fn computed_style(&self, node: &Self::Node, property: &str) -> String;

    /// Rendered bounding box area in square pixels
    fn bounding_area(&self, node: &Self::Node) -> f64;

    /// Top edge of the element relative to the document origin
    fn document_top(&self, node: &Self::Node) -> f64;

    /// Smoothly scroll the viewport to a vertical document offset
    fn scroll_to(&self, top: f64);

    /// Monotonic clock in milliseconds
    fn now_ms(&self) -> f64;

    /// Collation order of two titles in the page's locale
    ///
    /// Hosts without a collator fall back to accent- and case-folded order.
    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        compare_titles(a, b)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    /// Deep clone; the clone is detached
    fn clone_deep(&self, node: &Self::Node) -> Result<Self::Node, DomError>;

    /// Insert `node` into `parent` before `reference` (append when `None`)
    fn insert_before(
        &self,
        parent: &Self::Node,
        node: &Self::Node,
        reference: Option<&Self::Node>,
    ) -> Result<(), DomError>;

    fn append_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<(), DomError> {
        self.insert_before(parent, node, None)
    }

    /// Detach `node` from its parent
    fn remove(&self, node: &Self::Node);

    // ------------------------------------------------------------------
    // Form fields
    // ------------------------------------------------------------------

    fn input_value(&self, node: &Self::Node) -> String;
    fn set_input_value(&self, node: &Self::Node, value: &str);
}
