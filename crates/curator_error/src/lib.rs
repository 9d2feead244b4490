//! Error types for the Curator media catalog.
//!
//! This crate provides the foundation error types used throughout the Curator workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Absent rows and unsatisfiable filters are not errors: lookups return
//! `Option` and impossible filters return empty collections.
//!
//! # Examples
//!
//! ```
//! use curator_error::{CuratorResult, ValidationError, ValidationErrorKind};
//!
//! fn parse_status(name: &str) -> CuratorResult<i32> {
//!     Err(ValidationError::new(ValidationErrorKind::UnknownName {
//!         enumeration: "MediumStatus",
//!         name: name.to_string(),
//!     }))?
//! }
//!
//! assert!(parse_status("NOT_A_STATUS").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collision;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod validation;

pub use collision::CollisionError;
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{CuratorError, CuratorErrorKind, CuratorResult};
pub use validation::{ValidationError, ValidationErrorKind};
