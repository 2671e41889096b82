//! # Error Types
//!
//! Structured error types for bid_core. Each variant carries enough context
//! to understand and fix the problem programmatically - which input field
//! was bad, which pricing sheet was missing which columns, and so on.
//!
//! ## Example
//!
//! ```rust
//! use bid_core::errors::{BidError, BidResult};
//!
//! fn validate_height(height_ft: f64) -> BidResult<()> {
//!     if height_ft < 0.0 {
//!         return Err(BidError::invalid_input(
//!             "building_height_ft",
//!             height_ft.to_string(),
//!             "Height cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bid_core operations
pub type BidResult<T> = Result<T, BidError>;

/// Structured error type for bid calculation operations.
///
/// Each variant provides specific context about what went wrong. Errors are
/// JSON-serializable so callers (CLI, exporters, services) can surface them
/// without string parsing.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BidError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Compliance code selector not one of the recognized rule sets
    #[error("Unknown compliance code '{code}' - expected one of: UL 96A, NFPA 780")]
    UnknownComplianceCode { code: String },

    /// Pricing sheet is missing required columns
    #[error("Missing required columns in '{source_file}': {missing:?} (columns found: {found:?})")]
    MissingColumns {
        #[serde(rename = "source")]
        source_file: String,
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// Pricing sheet could not be read or parsed at the file level
    #[error("Catalog error: {operation} on '{source_file}' - {reason}")]
    CatalogError {
        operation: String,
        #[serde(rename = "source")]
        source_file: String,
        reason: String,
    },
}

impl BidError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BidError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownComplianceCode error
    pub fn unknown_code(code: impl Into<String>) -> Self {
        BidError::UnknownComplianceCode { code: code.into() }
    }

    /// Create a MissingColumns error
    pub fn missing_columns(
        source: impl Into<String>,
        missing: Vec<String>,
        found: Vec<String>,
    ) -> Self {
        BidError::MissingColumns {
            source_file: source.into(),
            missing,
            found,
        }
    }

    /// Create a CatalogError
    pub fn catalog_error(
        operation: impl Into<String>,
        source: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BidError::CatalogError {
            operation: operation.into(),
            source_file: source.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BidError::InvalidInput { .. } => "INVALID_INPUT",
            BidError::UnknownComplianceCode { .. } => "UNKNOWN_COMPLIANCE_CODE",
            BidError::MissingColumns { .. } => "MISSING_COLUMNS",
            BidError::CatalogError { .. } => "CATALOG_ERROR",
        }
    }
}
