//! Validation error types.

/// Field coercion failures raised while constructing entities or parsing input.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A name that matches no member of the enumeration
    #[display("Unknown {} name: {}", enumeration, name)]
    UnknownName {
        /// Enumeration being parsed
        enumeration: &'static str,
        /// The rejected name
        name: String,
    },
    /// An integer code outside the enumeration's members
    #[display("{} value out of range: {}", enumeration, value)]
    OutOfRange {
        /// Enumeration being parsed
        enumeration: &'static str,
        /// The rejected code
        value: i64,
    },
    /// Input that is not a valid identifier in bytes or text form
    #[display("Malformed identifier: {}", _0)]
    MalformedId(String),
    /// Input that is not an IPv4 or IPv6 address
    #[display("Invalid network address: {}", _0)]
    InvalidAddress(String),
    /// String field exceeding its column bound
    #[display("Field '{}' exceeds {} characters (got {})", field, max, actual)]
    TooLong {
        /// The field name
        field: &'static str,
        /// Maximum accepted length
        max: usize,
        /// Length supplied
        actual: usize,
    },
    /// Focus ratio outside [0, 1]
    #[display("Focus must be within [0, 1], got {}", _0)]
    FocusOutOfRange(f64),
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use curator_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::OutOfRange {
///     enumeration: "MediumStatus",
///     value: 2,
/// });
/// assert!(format!("{}", err).contains("out of range"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}
