//! Tests for the tag store.

mod test_utils;

use curator_core::{Medium, MediumDraft, MediumStatus, Tag, TagCount};
use curator_database::SqliteCatalog;
use curator_interface::{
    FilterValue, MediaFilter, MediaRepository, MediaSortField, Page, SortOrder, TagCountFilter,
    TagCountSortField, TagFilter, TagRepository, TagSortField,
};
use serde_json::json;
use test_utils::{catalog, create};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn tags_of(catalog: &SqliteCatalog, medium: &Medium) -> Vec<String> {
    let mut media = vec![medium.clone()];
    catalog.populate_media_tags(&mut media).unwrap();
    media.remove(0).tags
}

#[test]
fn test_set_tags_replaces_the_whole_set() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());

    catalog.set_tags(&[medium.id], &tags(&["a", "b"])).unwrap();
    assert_eq!(tags_of(&catalog, &medium), tags(&["a", "b"]));

    catalog.set_tags(&[medium.id], &tags(&["c"])).unwrap();
    assert_eq!(tags_of(&catalog, &medium), tags(&["c"]));

    catalog.set_tags(&[medium.id], &[]).unwrap();
    assert!(tags_of(&catalog, &medium).is_empty());
}

#[test]
fn test_add_tags_is_idempotent() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());

    catalog
        .add_tags(&[medium.id], &tags(&["x", "x", "y"]))
        .unwrap();
    catalog
        .add_tags(&[medium.id, medium.id], &tags(&["y", "z"]))
        .unwrap();

    assert_eq!(tags_of(&catalog, &medium), tags(&["x", "y", "z"]));
    assert_eq!(catalog.count_tags(&TagFilter::default()).unwrap(), 3);
}

#[test]
fn test_blank_tags_are_skipped_and_long_tags_rejected() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());

    catalog.add_tags(&[medium.id], &tags(&["", "ok"])).unwrap();
    assert_eq!(tags_of(&catalog, &medium), tags(&["ok"]));

    let err = catalog
        .add_tags(&[medium.id], &tags(&["seventeen-chars!!"]))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(tags_of(&catalog, &medium), tags(&["ok"]));
}

#[test]
fn test_large_batches_are_inserted_completely() {
    let catalog = catalog();
    let media: Vec<Medium> = (0..20)
        .map(|_| create(&catalog, MediumDraft::default()))
        .collect();
    let ids = test_utils::ids(&media);
    let many: Vec<String> = (0..20).map(|i| format!("tag{:02}", i)).collect();

    catalog.add_tags(&ids, &many).unwrap();

    assert_eq!(catalog.count_tags(&TagFilter::default()).unwrap(), 400);
    assert_eq!(
        catalog
            .count_unique_tags(&TagCountFilter::default())
            .unwrap(),
        20
    );
}

#[test]
fn test_remove_specific_tags_or_all() {
    let catalog = catalog();
    let first = create(&catalog, MediumDraft::default());
    let second = create(&catalog, MediumDraft::default());
    catalog
        .add_tags(&[first.id, second.id], &tags(&["a", "b", "c"]))
        .unwrap();

    catalog
        .remove_tags(&[first.id], &tags(&["a", "c"]))
        .unwrap();
    assert_eq!(tags_of(&catalog, &first), tags(&["b"]));
    assert_eq!(tags_of(&catalog, &second), tags(&["a", "b", "c"]));

    catalog.remove_tags(&[second.id], &[]).unwrap();
    assert!(tags_of(&catalog, &second).is_empty());
    assert_eq!(tags_of(&catalog, &first), tags(&["b"]));
}

#[test]
fn test_delete_tags_is_global() {
    let catalog = catalog();
    let first = create(&catalog, MediumDraft::default());
    let second = create(&catalog, MediumDraft::default());
    catalog
        .add_tags(&[first.id, second.id], &tags(&["gone", "kept"]))
        .unwrap();

    catalog.delete_tags(&tags(&["gone"])).unwrap();

    assert_eq!(tags_of(&catalog, &first), tags(&["kept"]));
    assert_eq!(tags_of(&catalog, &second), tags(&["kept"]));
}

#[test]
fn test_populate_leaves_untagged_media_empty() {
    let catalog = catalog();
    let tagged = create(&catalog, MediumDraft::default());
    let plain = create(&catalog, MediumDraft::default());
    catalog
        .add_tags(&[tagged.id], &tags(&["zeta", "alpha"]))
        .unwrap();

    let mut media = catalog
        .search_media(
            &MediaFilter::default(),
            &MediaSortField::Id,
            SortOrder::Asc,
            Page::all(),
        )
        .unwrap();
    assert!(media.iter().all(|medium| medium.tags.is_empty()));

    catalog.populate_media_tags(&mut media).unwrap();
    for medium in &media {
        if medium.id == tagged.id {
            assert_eq!(medium.tags, tags(&["alpha", "zeta"]));
        } else {
            assert_eq!(medium.id, plain.id);
            assert!(medium.tags.is_empty());
        }
    }
}

#[test]
fn test_populate_fills_every_copy_of_a_medium() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    catalog.add_tags(&[medium.id], &tags(&["b", "a"])).unwrap();

    let mut media = vec![medium.clone(), medium.clone(), medium.clone()];
    catalog.populate_media_tags(&mut media).unwrap();

    for copy in &media {
        assert_eq!(copy.tags, tags(&["a", "b"]));
    }
}

#[test]
fn test_search_tags_by_medium_and_pattern() {
    let catalog = catalog();
    let first = create(&catalog, MediumDraft::default());
    let second = create(&catalog, MediumDraft::default());
    catalog
        .add_tags(&[first.id], &tags(&["cat", "cow"]))
        .unwrap();
    catalog
        .add_tags(&[second.id], &tags(&["cat", "dog"]))
        .unwrap();

    let filter = TagFilter::default().medium_ids(vec![FilterValue::from(first.id)]);
    let found = catalog
        .search_tags(&filter, TagSortField::Tag, SortOrder::Desc, Page::all())
        .unwrap();
    assert_eq!(
        found,
        vec![Tag::new(first.id, "cow"), Tag::new(first.id, "cat")]
    );

    let filter = TagFilter::default().tags(tags(&["c%"]));
    assert_eq!(catalog.count_tags(&filter).unwrap(), 3);

    let filter: TagFilter = serde_json::from_value(json!({ "medium_ids": "garbage" })).unwrap();
    assert_eq!(catalog.count_tags(&filter).unwrap(), 0);
}

#[test]
fn test_tag_counts_sort_by_frequency_then_tag() {
    let catalog = catalog();
    let media: Vec<Medium> = (0..3)
        .map(|_| create(&catalog, MediumDraft::default()))
        .collect();
    catalog
        .add_tags(&test_utils::ids(&media), &tags(&["common"]))
        .unwrap();
    catalog
        .add_tags(&[media[0].id, media[1].id], &tags(&["pair", "duo"]))
        .unwrap();
    catalog.add_tags(&[media[2].id], &tags(&["solo"])).unwrap();

    let counts = catalog
        .search_tag_counts(
            &TagCountFilter::default(),
            TagCountSortField::Count,
            SortOrder::Desc,
            Page::all(),
        )
        .unwrap();
    assert_eq!(
        counts,
        vec![
            TagCount::new("common", 3),
            TagCount::new("pair", 2),
            TagCount::new("duo", 2),
            TagCount::new("solo", 1),
        ]
    );

    let first_page = catalog
        .search_tag_counts(
            &TagCountFilter::default(),
            TagCountSortField::Tag,
            SortOrder::Asc,
            Page::new(0, 2),
        )
        .unwrap();
    assert_eq!(
        first_page,
        vec![TagCount::new("common", 3), TagCount::new("duo", 2)]
    );
    assert_eq!(
        catalog
            .count_unique_tags(&TagCountFilter::default())
            .unwrap(),
        4
    );
}

#[test]
fn test_tag_counts_scoped_by_media_moderation() {
    let catalog = catalog();
    let allowed = create(&catalog, MediumDraft::default());
    let forbidden = create(
        &catalog,
        MediumDraft::default().with_status(MediumStatus::Forbidden),
    );
    catalog
        .add_tags(&[allowed.id, forbidden.id], &tags(&["shared"]))
        .unwrap();
    catalog
        .add_tags(&[forbidden.id], &tags(&["hidden"]))
        .unwrap();

    let filter: TagCountFilter =
        serde_json::from_value(json!({ "with_statuses": "ALLOWED" })).unwrap();
    let counts = catalog
        .search_tag_counts(&filter, TagCountSortField::Tag, SortOrder::Asc, Page::all())
        .unwrap();
    assert_eq!(counts, vec![TagCount::new("shared", 1)]);
    assert_eq!(catalog.count_unique_tags(&filter).unwrap(), 1);

    let filter: TagCountFilter =
        serde_json::from_value(json!({ "without_statuses": "bogus" })).unwrap();
    assert_eq!(catalog.count_unique_tags(&filter).unwrap(), 0);

    let filter = TagCountFilter::default().tags(tags(&["h%"]));
    assert_eq!(catalog.count_unique_tags(&filter).unwrap(), 1);
}
