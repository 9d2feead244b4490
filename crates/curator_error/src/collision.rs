//! Identifier collision errors.

/// Raised when a create operation targets an identifier that already exists.
///
/// Produced both by the pre-flight existence check and by the store's own
/// primary-key constraint; the latter is authoritative.
///
/// # Examples
///
/// ```
/// use curator_error::CollisionError;
///
/// let err = CollisionError::new("medium", "AAAAAAAAAAAAAAAAAAAAAA");
/// assert!(format!("{}", err).contains("medium ID collision"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Collision Error: {} ID collision on {} at line {} in {}",
    entity,
    id,
    line,
    file
)]
pub struct CollisionError {
    /// Entity kind ("medium", "like")
    pub entity: &'static str,
    /// Canonical text of the colliding identifier
    pub id: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CollisionError {
    /// Create a new CollisionError at the current location.
    #[track_caller]
    pub fn new(entity: &'static str, id: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            entity,
            id: id.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
