//! Error types for pathway model operations.
//!
//! Every structural violation is reported at the point where it happens: the
//! model never clamps or coerces an out-of-domain value.

use thiserror::Error;

use crate::identifier::ElementId;

/// Structural and validation errors raised by the pathway model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{field} must not be negative (got {value})")]
    NegativeDimension { field: &'static str, value: f64 },

    #[error("{field} must lie within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("element id `{0}` is already in use")]
    DuplicateElementId(ElementId),

    #[error("element `{0}` is not part of this pathway model")]
    UnknownElement(ElementId),

    #[error("element `{id}` is a {actual}, expected {expected}")]
    WrongKind {
        id: ElementId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("element `{member}` is already a member of group `{group}`")]
    AlreadyInGroup { member: ElementId, group: ElementId },

    #[error("element `{member}` cannot join group `{group}`: {reason}")]
    InvalidGroupMembership {
        member: ElementId,
        group: ElementId,
        reason: &'static str,
    },

    #[error("line `{line}` needs at least two points (got {count})")]
    TooFewPoints { line: ElementId, count: usize },

    #[error("element `{0}` cannot be the target of a line point")]
    NotLinkable(ElementId),

    #[error("xref `{0}` has no data source")]
    MissingDataSource(String),
}

/// Checks that `value` lies in the closed interval `[min, max]`.
pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ModelError> {
    if value.is_nan() || value < min || value > max {
        return Err(ModelError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds_inclusive() {
        assert!(check_range("position", 0.0, 0.0, 1.0).is_ok());
        assert!(check_range("position", 1.0, 0.0, 1.0).is_ok());
        assert!(check_range("position", 1.0001, 0.0, 1.0).is_err());
        assert!(check_range("position", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ModelError::OutOfRange {
            field: "relX",
            value: 1.5,
            min: -1.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "relX must lie within [-1, 1] (got 1.5)");

        let err = ModelError::DuplicateElementId(ElementId::new("a1"));
        assert_eq!(err.to_string(), "element id `a1` is already in use");
    }
}
