//! Moderation and visibility enumerations.
//!
//! Each enumeration has a canonical name and a stable integer code, and
//! both forms convert back to the same member.

use curator_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// Shared conversions for the closed moderation enumerations.
pub trait Moderation: Copy + Sized + std::str::FromStr + 'static {
    /// Name used in error messages.
    const ENUMERATION: &'static str;

    /// Integer code stored in the catalog.
    fn code(self) -> i32;

    /// Member for an integer code, if any.
    fn from_code(code: i32) -> Option<Self>;

    /// Parse a canonical member name such as `ALLOWED`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownName` if no member carries that name.
    #[track_caller]
    fn from_name(name: &str) -> Result<Self, ValidationError> {
        name.parse().map_err(|_| {
            ValidationError::new(ValidationErrorKind::UnknownName {
                enumeration: Self::ENUMERATION,
                name: name.to_string(),
            })
        })
    }

    /// Convert an integer code into a member.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if no member carries that code.
    #[track_caller]
    fn from_value(value: i64) -> Result<Self, ValidationError> {
        i32::try_from(value)
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| {
                ValidationError::new(ValidationErrorKind::OutOfRange {
                    enumeration: Self::ENUMERATION,
                    value,
                })
            })
    }
}

/// Moderation status of a medium.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(i32)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediumStatus {
    /// Removed by moderation
    Forbidden = -2,
    /// Removed on a copyright claim
    Copyright = -1,
    /// Visible subject to protection and searchability
    #[default]
    Allowed = 1,
}

/// Who may view a medium.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(i32)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediumProtection {
    /// Anyone
    #[default]
    None = 1,
    /// Members of a group sharing a bit in `group_bits`
    Groups = 2,
    /// The owner only
    Private = 3,
}

/// Where a medium appears in search results.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(i32)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediumSearchability {
    /// Reachable by id only
    #[default]
    Hidden = 1,
    /// Searchable by group members
    Groups = 2,
    /// Searchable by everyone
    Public = 3,
}

impl Moderation for MediumStatus {
    const ENUMERATION: &'static str = "MediumStatus";

    fn code(self) -> i32 {
        self as i32
    }

    fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }
}

impl Moderation for MediumProtection {
    const ENUMERATION: &'static str = "MediumProtection";

    fn code(self) -> i32 {
        self as i32
    }

    fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }
}

impl Moderation for MediumSearchability {
    const ENUMERATION: &'static str = "MediumSearchability";

    fn code(self) -> i32 {
        self as i32
    }

    fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }
}

impl TryFrom<i32> for MediumStatus {
    type Error = ValidationError;

    #[track_caller]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value.into())
    }
}

impl TryFrom<i32> for MediumProtection {
    type Error = ValidationError;

    #[track_caller]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value.into())
    }
}

impl TryFrom<i32> for MediumSearchability {
    type Error = ValidationError;

    #[track_caller]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value.into())
    }
}
