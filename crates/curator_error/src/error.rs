//! Top-level error wrapper types.

use crate::{CollisionError, ConfigError, ValidationError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// Every failure a catalog operation can surface.
///
/// # Examples
///
/// ```
/// use curator_error::{CuratorError, CuratorErrorKind, CollisionError};
///
/// let err: CuratorError = CollisionError::new("like", "abc").into();
/// assert!(matches!(err.kind(), CuratorErrorKind::Collision(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CuratorErrorKind {
    /// Field failed type or range coercion
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Create targeted an existing identifier
    #[from(CollisionError)]
    Collision(CollisionError),
    /// Configuration could not be loaded
    #[from(ConfigError)]
    Config(ConfigError),
    /// Store interaction failed
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

#[cfg(feature = "database")]
impl From<diesel::result::Error> for CuratorErrorKind {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        CuratorErrorKind::Database(DatabaseError::from(err))
    }
}

/// Curator error with kind discrimination.
///
/// # Examples
///
/// ```
/// use curator_error::{ConfigError, CuratorResult};
///
/// fn might_fail() -> CuratorResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Curator Error: {}", _0)]
pub struct CuratorError(Box<CuratorErrorKind>);

impl CuratorError {
    /// Create a new error from a kind.
    pub fn new(kind: CuratorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CuratorErrorKind {
        &self.0
    }

    /// Whether this error reports an identifier collision.
    pub fn is_collision(&self) -> bool {
        matches!(self.kind(), CuratorErrorKind::Collision(_))
    }

    /// Whether this error reports a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), CuratorErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to CuratorErrorKind
impl<T> From<T> for CuratorError
where
    T: Into<CuratorErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Curator operations.
pub type CuratorResult<T> = std::result::Result<T, CuratorError>;
