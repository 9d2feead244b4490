//! Tests for the like store.

mod test_utils;

use curator_core::{Id, LikeDraft, MediumDraft};
use curator_interface::{
    FilterValue, LikeFilter, LikeRepository, LikeSortField, MediaRepository, Page, SortOrder,
};
use serde_json::json;
use test_utils::{catalog, create};

#[test]
fn test_create_like_then_get() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    let user = Id::generate();

    let like = catalog.create_like(&medium.id, &user).unwrap();
    assert_eq!(like.medium_id(), &medium.id);
    assert_eq!(like.user_id(), &user);
    assert_eq!(catalog.get_like(like.id()).unwrap(), Some(like));
    assert_eq!(catalog.get_like(&Id::generate()).unwrap(), None);
}

#[test]
fn test_explicit_like_id_collides() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    let id = Id::generate();
    let draft = LikeDraft::new(medium.id, Id::generate()).with_id(id);

    catalog.create_like_from(draft.clone()).unwrap();
    let err = catalog.create_like_from(draft).unwrap_err();

    assert!(err.is_collision());
    assert_eq!(catalog.count_likes(&LikeFilter::default()).unwrap(), 1);
}

#[test]
fn test_explicit_creation_time_is_kept() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    let like = catalog
        .create_like_from(LikeDraft::new(medium.id, Id::generate()).with_creation_time(77))
        .unwrap();
    assert_eq!(
        *catalog
            .get_like(like.id())
            .unwrap()
            .unwrap()
            .creation_time(),
        77
    );
}

#[test]
fn test_search_likes_by_user_in_time_order() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    let user = Id::generate();
    let mut created = Vec::new();
    for time in [30, 10, 20] {
        created.push(
            catalog
                .create_like_from(LikeDraft::new(medium.id, user).with_creation_time(time))
                .unwrap(),
        );
    }
    catalog.create_like(&medium.id, &Id::generate()).unwrap();

    let filter = LikeFilter::default().user_ids(vec![FilterValue::from(user)]);
    let found = catalog
        .search_likes(
            &filter,
            LikeSortField::CreationTime,
            SortOrder::Asc,
            Page::all(),
        )
        .unwrap();
    assert_eq!(
        found
            .iter()
            .map(|like| *like.creation_time())
            .collect::<Vec<_>>(),
        vec![10, 20, 30]
    );
    assert_eq!(catalog.count_likes(&filter).unwrap(), 3);

    let page = catalog
        .search_likes(
            &filter,
            LikeSortField::CreationTime,
            SortOrder::Desc,
            Page::new(1, 2),
        )
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(*page[0].creation_time(), 10);
}

#[test]
fn test_like_filter_cutoffs_and_malformed_ids() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    for time in [5, 15, 25] {
        catalog
            .create_like_from(LikeDraft::new(medium.id, Id::generate()).with_creation_time(time))
            .unwrap();
    }

    let filter: LikeFilter =
        serde_json::from_value(json!({ "created_after": 5, "created_before": 25 })).unwrap();
    assert_eq!(catalog.count_likes(&filter).unwrap(), 1);

    let filter: LikeFilter = serde_json::from_value(json!({ "medium_ids": ["bad"] })).unwrap();
    assert_eq!(catalog.count_likes(&filter).unwrap(), 0);
}

#[test]
fn test_delete_like_updates_count() {
    let catalog = catalog();
    let medium = create(&catalog, MediumDraft::default());
    let like = catalog.create_like(&medium.id, &Id::generate()).unwrap();
    catalog.create_like(&medium.id, &Id::generate()).unwrap();

    catalog.delete_like(like.id()).unwrap();
    catalog.delete_like(&Id::generate()).unwrap();

    assert_eq!(catalog.get_like(like.id()).unwrap(), None);
    assert_eq!(
        catalog.get_medium(&medium.id).unwrap().unwrap().like_count,
        1
    );
}

#[test]
fn test_delete_user_likes_removes_only_that_user() {
    let catalog = catalog();
    let first = create(&catalog, MediumDraft::default());
    let second = create(&catalog, MediumDraft::default());
    let leaving = Id::generate();
    let staying = Id::generate();
    catalog.create_like(&first.id, &leaving).unwrap();
    catalog.create_like(&second.id, &leaving).unwrap();
    catalog.create_like(&first.id, &staying).unwrap();

    catalog.delete_user_likes(&leaving).unwrap();

    let remaining = catalog
        .search_likes(
            &LikeFilter::default(),
            LikeSortField::UserId,
            SortOrder::Asc,
            Page::all(),
        )
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id(), &staying);
    assert_eq!(
        catalog.get_medium(&second.id).unwrap().unwrap().like_count,
        0
    );
}
