//! Seeds for reproducible pseudo-random ordering.

use curator_core::{decode_id_bytes, encode_id_bytes};
use curator_error::{ValidationError, ValidationErrorKind};

/// Largest seed token, in decoded bytes.
const MAX_SEED_BYTES: usize = 16;

/// Bytes in a freshly generated seed.
const GENERATED_SEED_BYTES: usize = 4;

/// A random-order seed and the token it was decoded from.
///
/// The token uses the identifier alphabet; its bytes are read as a
/// big-endian integer.
///
/// # Examples
///
/// ```
/// use curator_interface::RandomSeed;
///
/// let seed = RandomSeed::from_token("AQI").unwrap();
/// assert_eq!(*seed.value(), 0x0102);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct RandomSeed {
    /// Integer seed
    value: u128,
    /// Token as supplied
    token: String,
}

impl RandomSeed {
    /// Decode a seed token of 1 to 16 bytes.
    ///
    /// # Errors
    ///
    /// Returns `MalformedId` when the token is not base64 or decodes to
    /// more than 16 bytes.
    #[track_caller]
    pub fn from_token(token: &str) -> Result<Self, ValidationError> {
        let bytes = decode_id_bytes(token)?;
        if bytes.is_empty() || bytes.len() > MAX_SEED_BYTES {
            return Err(ValidationError::new(ValidationErrorKind::MalformedId(
                format!("seed of {} bytes", bytes.len()),
            )));
        }
        let value = bytes
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));
        Ok(Self {
            value,
            token: token.to_string(),
        })
    }

    /// Generate a fresh four-byte seed.
    pub fn generate() -> Self {
        let bytes: [u8; GENERATED_SEED_BYTES] = rand::random();
        let value = u128::from(u32::from_be_bytes(bytes));
        Self {
            value,
            token: encode_id_bytes(&bytes),
        }
    }
}

impl std::fmt::Display for RandomSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}
