//! Core data types for the Curator media catalog.
//!
//! This crate provides the entities shared by every Curator crate: the
//! identifier codec, the moderation enumerations, media, tags and likes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod address;
mod adjacent;
mod group_bits;
mod id;
mod like;
mod medium;
mod moderation;
mod tag;
mod telemetry;

pub use address::{pack_address, unpack_address};
pub use adjacent::AdjacentMedia;
pub use group_bits::GroupBits;
pub use id::{ID_LENGTH, Id, decode_id_bytes, encode_id_bytes};
pub use like::{Like, LikeDraft};
pub use medium::{DEFAULT_FOCUS, MAX_MIME_LENGTH, Medium, MediumDraft, MediumUpdate, now_timestamp};
pub use moderation::{MediumProtection, MediumSearchability, MediumStatus, Moderation};
pub use tag::{MAX_TAG_LENGTH, Tag, TagCount, normalize_tags};
pub use telemetry::init_tracing;
