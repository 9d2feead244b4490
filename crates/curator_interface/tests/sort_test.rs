use curator_interface::{
    DataSlot, LikeSortField, MediaSortField, Page, RandomSeed, SortOrder, TagCountSortField,
    TagSortField,
};

#[test]
fn media_sort_tokens_parse() {
    assert_eq!(
        MediaSortField::parse("creation_time"),
        MediaSortField::CreationTime
    );
    assert_eq!(
        MediaSortField::parse("upload_time"),
        MediaSortField::UploadTime
    );
    assert_eq!(
        MediaSortField::parse("touch_time"),
        MediaSortField::TouchTime
    );
    assert_eq!(MediaSortField::parse("size"), MediaSortField::Size);
    assert_eq!(MediaSortField::parse("likes"), MediaSortField::Likes);
    assert_eq!(
        MediaSortField::parse("data5"),
        MediaSortField::Data(DataSlot::Data5)
    );
    assert_eq!(MediaSortField::parse("data7"), MediaSortField::CreationTime);
    assert_eq!(MediaSortField::parse(""), MediaSortField::CreationTime);
}

#[test]
fn random_sort_keeps_seed() {
    let seed = RandomSeed::generate();
    let field = MediaSortField::parse(&format!("random:{}", seed));
    assert_eq!(field, MediaSortField::Random(seed));
    assert!(field.is_random());
}

#[test]
fn secondary_sorts_fall_back_to_defaults() {
    assert_eq!(TagSortField::parse("medium_id"), TagSortField::MediumId);
    assert_eq!(TagSortField::parse("count"), TagSortField::Tag);
    assert_eq!(TagCountSortField::parse("count"), TagCountSortField::Count);
    assert_eq!(TagCountSortField::parse("likes"), TagCountSortField::Tag);
    assert_eq!(LikeSortField::parse("user_id"), LikeSortField::UserId);
    assert_eq!(LikeSortField::parse("size"), LikeSortField::CreationTime);
}

#[test]
fn order_reverses() {
    assert_eq!(SortOrder::Asc.reverse(), SortOrder::Desc);
    assert_eq!(SortOrder::default().keyword(), "DESC");
}

#[test]
fn pages_window_rows() {
    assert_eq!(Page::new(0, 25).offset(), 0);
    assert_eq!(Page::new(4, 25).offset(), 100);
    let unlimited = Page {
        number: 3,
        size: None,
    };
    assert_eq!(unlimited.offset(), 0);
    assert_eq!(unlimited.limit(), None);
}
