//! Query vocabulary and repository traits for the Curator media catalog.
//!
//! Filters keep caller input in raw form so that the persistence layer can
//! apply the catalog's leniency rules: values that fail to parse are
//! dropped, and a group whose every value fails becomes unsatisfiable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filter;
mod page;
mod seed;
mod sort;
mod traits;
mod value;

pub use filter::{LikeFilter, MediaFilter, TagCountFilter, TagFilter};
pub use page::Page;
pub use seed::RandomSeed;
pub use sort::{DataSlot, LikeSortField, MediaSortField, SortOrder, TagCountSortField, TagSortField};
pub use traits::{LikeRepository, MediaRepository, TagRepository};
pub use value::{FilterValue, one_or_many};
