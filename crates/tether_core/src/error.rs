//! Geometry error types

use thiserror::Error;

use crate::geometry::{Rect, ValueKind};

/// Errors raised by geometry operations and the streams that carry them
///
/// Every variant is local to the combination or attribute that produced it.
/// On a stream it arrives as the terminal error event of the derived stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// An operation was applied to a value kind it does not support, or the
    /// operands of one combination carried different kinds
    #[error("Unsupported operand for {operation}: {detail}")]
    UnsupportedOperand {
        operation: &'static str,
        detail: String,
    },

    /// A bound value does not match the kind its layout attribute expects
    #[error("Attribute `{attribute}` expects {expected} values, got {found}")]
    AttributeTypeMismatch {
        attribute: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A rect with zero width or height was used as a coordinate space
    #[error("Degenerate bounds: {0}")]
    DegenerateBounds(Rect),
}

impl GeometryError {
    /// Error for `operation` rejecting its operands
    pub fn unsupported(operation: &'static str, detail: impl Into<String>) -> Self {
        GeometryError::UnsupportedOperand {
            operation,
            detail: detail.into(),
        }
    }

    /// Error for `operation` receiving a value of the wrong kind
    pub fn unexpected_kind(operation: &'static str, expected: ValueKind, found: ValueKind) -> Self {
        GeometryError::UnsupportedOperand {
            operation,
            detail: format!("expected {expected}, got {found}"),
        }
    }
}

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;
