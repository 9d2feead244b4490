//! Opaque 128-bit identifiers and their canonical text encoding.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use curator_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// URL-safe base64 without padding; decoding tolerates padded input.
const ID_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Number of raw bytes in an identifier.
pub const ID_LENGTH: usize = 16;

/// A 128-bit identifier rendered as 22 characters of URL-safe base64.
///
/// Ordering follows the raw bytes, which is also how the store compares
/// identifier columns.
///
/// # Examples
///
/// ```
/// use curator_core::Id;
///
/// let id = Id::generate();
/// let parsed = Id::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id(Uuid);

impl Id {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the canonical text form.
    ///
    /// # Errors
    ///
    /// Returns `MalformedId` if the text is not base64 or does not decode
    /// to exactly 16 bytes.
    #[track_caller]
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let bytes = decode_id_bytes(text)?;
        Self::from_slice(&bytes)
    }

    /// Build an identifier from its raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `MalformedId` unless exactly 16 bytes are supplied.
    #[track_caller]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        Uuid::from_slice(bytes).map(Self).map_err(|_| {
            ValidationError::new(ValidationErrorKind::MalformedId(format!(
                "expected {} bytes, got {}",
                ID_LENGTH,
                bytes.len()
            )))
        })
    }

    /// Parse an optional identifier, generating one when absent.
    ///
    /// # Errors
    ///
    /// Returns `MalformedId` when text is supplied but does not parse.
    #[track_caller]
    pub fn generate_or_parse(text: Option<&str>) -> Result<Self, ValidationError> {
        match text {
            Some(text) => Self::parse(text),
            None => Ok(Self::generate()),
        }
    }

    /// Raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
        self.0.as_bytes()
    }

    /// Raw identifier bytes as an owned vector, the form stored in blob columns.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

/// Decode URL-safe base64 of any length into raw bytes.
///
/// Used for identifiers and for random-order seed tokens, which may be
/// shorter than an identifier.
///
/// # Errors
///
/// Returns `MalformedId` if the text is empty or not valid base64.
#[track_caller]
pub fn decode_id_bytes(text: &str) -> Result<Vec<u8>, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::MalformedId(
            "empty identifier".to_string(),
        )));
    }
    ID_ENGINE.decode(text).map_err(|e| {
        ValidationError::new(ValidationErrorKind::MalformedId(format!("{}: {}", text, e)))
    })
}

/// Encode raw bytes in the canonical identifier alphabet.
pub fn encode_id_bytes(bytes: &[u8]) -> String {
    ID_ENGINE.encode(bytes)
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode_id_bytes(self.as_bytes()))
    }
}

impl std::str::FromStr for Id {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Id {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.to_string()
    }
}

impl From<Uuid> for Id {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
