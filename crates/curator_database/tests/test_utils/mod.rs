//! Test utilities for catalog integration tests.
//!
//! Every helper works on a fresh in-memory catalog.

#![allow(dead_code)]

use curator_core::{Id, Medium, MediumDraft};
use curator_database::SqliteCatalog;
use curator_interface::{
    LikeRepository, MediaFilter, MediaRepository, MediaSortField, Page, SortOrder,
};

/// A migrated, empty catalog.
pub fn catalog() -> SqliteCatalog {
    let _ = curator_core::init_tracing();
    SqliteCatalog::in_memory().expect("in-memory catalog should open")
}

/// Insert a medium from `draft`.
pub fn create(catalog: &SqliteCatalog, draft: MediumDraft) -> Medium {
    catalog.create_medium(draft).expect("medium should insert")
}

/// Insert a medium with the given size and creation time.
pub fn create_sized(catalog: &SqliteCatalog, size: i64, creation_time: i64) -> Medium {
    create(
        catalog,
        MediumDraft::default()
            .with_size(size)
            .with_creation_time(creation_time),
    )
}

/// Record `count` likes on `medium` from fresh users.
pub fn like_times(catalog: &SqliteCatalog, medium: &Medium, count: usize) {
    for _ in 0..count {
        catalog
            .create_like(&medium.id, &Id::generate())
            .expect("like should insert");
    }
}

/// Build a filter from JSON.
pub fn filter(value: serde_json::Value) -> MediaFilter {
    serde_json::from_value(value).expect("filter should deserialize")
}

/// Ids of the whole view in order.
pub fn search_ids(
    catalog: &SqliteCatalog,
    filter: &MediaFilter,
    sort: &MediaSortField,
    order: SortOrder,
) -> Vec<Id> {
    ids(&catalog
        .search_media(filter, sort, order, Page::all())
        .expect("search should succeed"))
}

/// Ids of `media`, in order.
pub fn ids(media: &[Medium]) -> Vec<Id> {
    media.iter().map(|medium| medium.id).collect()
}

/// `media` ids in byte order.
pub fn sorted_ids(media: &[&Medium]) -> Vec<Id> {
    let mut ids: Vec<Id> = media.iter().map(|medium| medium.id).collect();
    ids.sort();
    ids
}
