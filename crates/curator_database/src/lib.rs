//! SQLite persistence and query engine for the Curator media catalog.
//!
//! This crate stores media, tags and likes with Diesel and answers the
//! filtered, sorted and paginated queries described by `curator_interface`.
//!
//! # Features
//!
//! - Composable media predicates rendered to parameterized SQL
//! - Like counts aggregated at read time, globally or per user
//! - Stable, seeded random ordering
//! - Neighbor lookup without materializing the view
//! - Embedded migrations
//!
//! # Example
//!
//! ```
//! use curator_core::MediumDraft;
//! use curator_database::SqliteCatalog;
//! use curator_interface::{MediaFilter, MediaRepository, MediaSortField, Page, SortOrder};
//!
//! let catalog = SqliteCatalog::in_memory().unwrap();
//! catalog.create_medium(MediumDraft::default().with_size(10)).unwrap();
//! catalog.create_medium(MediumDraft::default().with_size(20)).unwrap();
//!
//! let media = catalog
//!     .search_media(
//!         &MediaFilter::default(),
//!         &MediaSortField::Size,
//!         SortOrder::Asc,
//!         Page::new(0, 10),
//!     )
//!     .unwrap();
//! assert_eq!(media.iter().map(|m| m.size).collect::<Vec<_>>(), vec![10, 20]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adjacency;
mod catalog;
mod conditions;
mod config;
mod connection;
mod likes;
mod media;
mod models;
mod ordering;
mod predicate;
mod random_order;
mod sql;
mod tags;

/// Diesel table definitions.
#[allow(missing_docs)]
pub mod schema;

pub use catalog::SqliteCatalog;
pub use config::{CatalogConfig, CatalogConfigBuilder, RandomOrdering};
pub use connection::{establish_connection, revert_migrations, run_migrations};
pub use random_order::{NativeSeededRandom, RandomOrderStrategy, SyntheticRowKey};
pub use sql::{SqlFragment, SqlValue};

pub use curator_error::{DatabaseError, DatabaseErrorKind};

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
