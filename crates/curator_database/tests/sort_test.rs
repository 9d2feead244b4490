//! Tests for media ordering and pagination.

mod test_utils;

use std::sync::Arc;

use curator_core::{Id, Medium, MediumDraft};
use curator_database::{NativeSeededRandom, SyntheticRowKey};
use curator_interface::{MediaFilter, MediaRepository, MediaSortField, Page, RandomSeed, SortOrder};
use test_utils::{catalog, create, create_sized, like_times, search_ids};

fn random(token: &str) -> MediaSortField {
    MediaSortField::Random(RandomSeed::from_token(token).unwrap())
}

#[test]
fn test_size_sort_breaks_ties_by_creation_time_then_id() {
    let catalog = catalog();
    let big = create_sized(&catalog, 300, 1);
    let tied_late = create_sized(&catalog, 200, 20);
    let tied_early = create_sized(&catalog, 200, 10);
    let small = create_sized(&catalog, 100, 5);
    let twin_a = create_sized(&catalog, 200, 20);
    let (twin_low, twin_high) = if twin_a.id < tied_late.id {
        (twin_a.id, tied_late.id)
    } else {
        (tied_late.id, twin_a.id)
    };

    assert_eq!(
        search_ids(
            &catalog,
            &MediaFilter::default(),
            &MediaSortField::Size,
            SortOrder::Asc,
        ),
        vec![small.id, tied_early.id, twin_low, twin_high, big.id]
    );
    assert_eq!(
        search_ids(
            &catalog,
            &MediaFilter::default(),
            &MediaSortField::Size,
            SortOrder::Desc,
        ),
        vec![big.id, twin_high, twin_low, tied_early.id, small.id]
    );
}

#[test]
fn test_unrecognized_sort_falls_back_to_creation_time() {
    let catalog = catalog();
    let first = create_sized(&catalog, 0, 100);
    let second = create_sized(&catalog, 0, 200);
    let third = create_sized(&catalog, 0, 300);

    assert_eq!(
        search_ids(
            &catalog,
            &MediaFilter::default(),
            &MediaSortField::parse(""),
            SortOrder::Desc,
        ),
        vec![third.id, second.id, first.id]
    );
    assert_eq!(
        search_ids(
            &catalog,
            &MediaFilter::default(),
            &MediaSortField::parse("no_such_field"),
            SortOrder::Asc,
        ),
        vec![first.id, second.id, third.id]
    );
}

#[test]
fn test_id_sort_follows_byte_order() {
    let catalog = catalog();
    let media: Vec<Medium> = (0..6)
        .map(|_| create(&catalog, MediumDraft::default()))
        .collect();
    let mut expected = test_utils::ids(&media);
    expected.sort();

    assert_eq!(
        search_ids(
            &catalog,
            &MediaFilter::default(),
            &MediaSortField::Id,
            SortOrder::Asc,
        ),
        expected
    );
    expected.reverse();
    assert_eq!(
        search_ids(
            &catalog,
            &MediaFilter::default(),
            &MediaSortField::Id,
            SortOrder::Desc,
        ),
        expected
    );
}

#[test]
fn test_mime_and_data_sorts() {
    let catalog = catalog();
    let webm = create(
        &catalog,
        MediumDraft::default().with_mime("video/webm").with_data2(1),
    );
    let gif = create(
        &catalog,
        MediumDraft::default().with_mime("image/gif").with_data2(3),
    );
    let png = create(
        &catalog,
        MediumDraft::default().with_mime("image/png").with_data2(2),
    );
    let everything = MediaFilter::default();

    assert_eq!(
        search_ids(
            &catalog,
            &everything,
            &MediaSortField::parse("mime"),
            SortOrder::Asc,
        ),
        vec![gif.id, png.id, webm.id]
    );
    assert_eq!(
        search_ids(
            &catalog,
            &everything,
            &MediaSortField::parse("data2"),
            SortOrder::Desc,
        ),
        vec![gif.id, png.id, webm.id]
    );
}

#[test]
fn test_likes_sort_uses_aggregated_counts() {
    let catalog = catalog();
    let none = create_sized(&catalog, 0, 1);
    let many = create_sized(&catalog, 0, 2);
    let one = create_sized(&catalog, 0, 3);
    like_times(&catalog, &many, 3);
    like_times(&catalog, &one, 1);

    let media = catalog
        .search_media(
            &MediaFilter::default(),
            &MediaSortField::Likes,
            SortOrder::Desc,
            Page::all(),
        )
        .unwrap();
    assert_eq!(test_utils::ids(&media), vec![many.id, one.id, none.id]);
    assert_eq!(
        media
            .iter()
            .map(|medium| medium.like_count)
            .collect::<Vec<_>>(),
        vec![3, 1, 0]
    );
}

#[test]
fn test_pages_partition_the_view() {
    let catalog = catalog();
    for size in 0..11 {
        create_sized(&catalog, size, 1);
    }
    let full = search_ids(
        &catalog,
        &MediaFilter::default(),
        &MediaSortField::Size,
        SortOrder::Asc,
    );

    let mut paged: Vec<Id> = Vec::new();
    for number in 0..4 {
        let page = catalog
            .search_media(
                &MediaFilter::default(),
                &MediaSortField::Size,
                SortOrder::Asc,
                Page::new(number, 4),
            )
            .unwrap();
        assert!(page.len() <= 4);
        paged.extend(test_utils::ids(&page));
    }
    assert_eq!(paged, full);
    assert_eq!(paged.len(), 11);
}

#[test]
fn test_random_order_is_stable_per_seed() {
    let catalog = catalog();
    for _ in 0..30 {
        create(&catalog, MediumDraft::default());
    }
    let filter = MediaFilter::default();

    let first = search_ids(&catalog, &filter, &random("AQIDBA"), SortOrder::Asc);
    let again = search_ids(&catalog, &filter, &random("AQIDBA"), SortOrder::Asc);
    let other = search_ids(&catalog, &filter, &random("BAMCAQ"), SortOrder::Asc);

    assert_eq!(first.len(), 30);
    assert_eq!(first, again);
    assert_ne!(first, other);
}

#[test]
fn test_random_order_direction_reverses_the_sequence() {
    let catalog = catalog();
    for _ in 0..12 {
        create(&catalog, MediumDraft::default());
    }
    let filter = MediaFilter::default();

    let mut ascending = search_ids(&catalog, &filter, &random("Zm9v"), SortOrder::Asc);
    let descending = search_ids(&catalog, &filter, &random("Zm9v"), SortOrder::Desc);
    ascending.reverse();
    assert_eq!(ascending, descending);
}

#[test]
fn test_random_pages_partition_the_view() {
    let catalog = catalog();
    for _ in 0..9 {
        create(&catalog, MediumDraft::default());
    }
    let sort = random("c2VlZA");
    let filter = MediaFilter::default();
    let full = search_ids(&catalog, &filter, &sort, SortOrder::Asc);

    let mut paged = Vec::new();
    for number in 0..3 {
        let page = catalog
            .search_media(&filter, &sort, SortOrder::Asc, Page::new(number, 3))
            .unwrap();
        paged.extend(test_utils::ids(&page));
    }
    assert_eq!(paged, full);
}

#[test]
fn test_single_segment_synthetic_key_still_orders_every_row() {
    let catalog = catalog().with_random_strategy(Arc::new(SyntheticRowKey::new(1)));
    for _ in 0..10 {
        create(&catalog, MediumDraft::default());
    }
    let ids = search_ids(
        &catalog,
        &MediaFilter::default(),
        &random("AQ"),
        SortOrder::Asc,
    );
    assert_eq!(ids.len(), 10);
}

#[test]
fn test_native_strategy_renders_engine_function() {
    let catalog = catalog().with_random_strategy(Arc::new(NativeSeededRandom::new("no_such_fn")));
    create(&catalog, MediumDraft::default());

    let result = catalog.search_media(
        &MediaFilter::default(),
        &random("AQ"),
        SortOrder::Asc,
        Page::all(),
    );
    assert!(result.is_err());
}
