//! Error types for the filter engine
//!
//! Missing optional markup is not an error: those paths log a warning and
//! degrade. Errors are reserved for unusable configuration and for DOM
//! operations the host refused.

use thiserror::Error;

use crate::dom::DomError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Configuration failed validation or could not be deserialized
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A structural DOM operation failed
    #[error("DOM operation failed: {0}")]
    Dom(#[from] DomError),
}
