//! Error codes for document conversion.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Reading a document
//! - `E2xx` - Resolving references between elements
//! - `E3xx` - Schema validation
//! - `E4xx` - Writing a document

use std::fmt;

/// Error codes for categorizing conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Read Errors (E1xx)
    // =========================================================================
    /// Missing required attribute.
    ///
    /// An attribute the format requires is absent and has no default.
    E100,

    /// Invalid attribute value.
    ///
    /// A numeric, boolean or colour attribute could not be parsed, or a
    /// value is outside the range the model accepts.
    E101,

    /// Missing required element.
    ///
    /// A child element the format requires, such as `Graphics`, is absent.
    E102,

    /// Invalid line.
    ///
    /// A line has fewer than two points.
    E103,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// A reference names an element that does not exist in the document.
    E200,

    /// Invalid reference target.
    ///
    /// A reference names an element of a kind that cannot be referenced
    /// from this position.
    E201,

    /// Duplicate identifier.
    ///
    /// Two elements of the document share an identifier.
    E202,

    // =========================================================================
    // Validation Errors (E3xx)
    // =========================================================================
    /// Unexpected root element.
    ///
    /// The root element is not declared by the schema.
    E300,

    /// Unexpected element.
    ///
    /// An element appears where the content model does not allow it.
    E301,

    /// Missing element.
    ///
    /// The content model requires further child elements.
    E302,

    /// Unknown attribute.
    ///
    /// An attribute is not declared for this element.
    E303,

    /// Missing required attribute.
    ///
    /// An attribute declared with `use="required"` is absent.
    E304,

    /// Invalid value.
    ///
    /// An attribute value or text content does not match its declared type.
    E305,

    /// Duplicate ID.
    ///
    /// Two `xsd:ID` values in the document are equal.
    E306,

    /// Dangling IDREF.
    ///
    /// An `xsd:IDREF` value names no `xsd:ID` in the document.
    E307,

    /// Unexpected text.
    ///
    /// Character data appears in an element with element-only content.
    E308,

    // =========================================================================
    // Write Errors (E4xx)
    // =========================================================================
    /// Missing data source.
    ///
    /// An xref without a data source cannot be written.
    E400,

    /// Inconsistent model.
    ///
    /// The model references an element that is not part of it.
    E401,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Read errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Reference errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            // Validation errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E304 => "E304",
            ErrorCode::E305 => "E305",
            ErrorCode::E306 => "E306",
            ErrorCode::E307 => "E307",
            ErrorCode::E308 => "E308",
            // Write errors
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Read errors
            ErrorCode::E100 => "missing required attribute",
            ErrorCode::E101 => "invalid attribute value",
            ErrorCode::E102 => "missing required element",
            ErrorCode::E103 => "invalid line",
            // Reference errors
            ErrorCode::E200 => "unresolved reference",
            ErrorCode::E201 => "invalid reference target",
            ErrorCode::E202 => "duplicate identifier",
            // Validation errors
            ErrorCode::E300 => "unexpected root element",
            ErrorCode::E301 => "unexpected element",
            ErrorCode::E302 => "missing element",
            ErrorCode::E303 => "unknown attribute",
            ErrorCode::E304 => "missing required attribute",
            ErrorCode::E305 => "invalid value",
            ErrorCode::E306 => "duplicate ID",
            ErrorCode::E307 => "dangling IDREF",
            ErrorCode::E308 => "unexpected text",
            // Write errors
            ErrorCode::E400 => "missing data source",
            ErrorCode::E401 => "inconsistent model",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::E305.to_string(), "E305");
        assert_eq!(ErrorCode::E401.to_string(), "E401");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "missing required attribute");
        assert_eq!(ErrorCode::E202.description(), "duplicate identifier");
        assert_eq!(ErrorCode::E307.description(), "dangling IDREF");
    }
}
