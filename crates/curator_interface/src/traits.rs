//! Repository traits implemented by catalog backends.
//!
//! All operations are synchronous and blocking. Lookups of missing rows
//! return `None`; unsatisfiable filters return empty results.

use curator_core::{
    AdjacentMedia, Id, Like, LikeDraft, Medium, MediumDraft, MediumUpdate, Tag, TagCount,
};
use curator_error::CuratorResult;

use crate::{
    LikeFilter, LikeSortField, MediaFilter, MediaSortField, Page, SortOrder, TagCountFilter,
    TagCountSortField, TagFilter, TagSortField,
};

/// Storage and querying of media.
pub trait MediaRepository {
    /// Insert a new medium.
    ///
    /// Fails with a collision error if the id already exists.
    fn create_medium(&self, draft: MediumDraft) -> CuratorResult<Medium>;

    /// Fetch one medium with its like count, without tags.
    fn get_medium(&self, id: &Id) -> CuratorResult<Option<Medium>>;

    /// Apply a partial update; touch time refreshes unless supplied.
    fn update_medium(&self, id: &Id, update: MediumUpdate) -> CuratorResult<()>;

    /// Delete a medium together with its tags and likes.
    fn delete_medium(&self, id: &Id) -> CuratorResult<()>;

    /// Media matching `filter`, ordered and windowed.
    ///
    /// Like counts are populated; tags are not.
    fn search_media(
        &self,
        filter: &MediaFilter,
        sort: &MediaSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<Medium>>;

    /// Number of media matching `filter`.
    fn count_media(&self, filter: &MediaFilter) -> CuratorResult<i64>;

    /// Sum of `size` over media matching `filter`.
    fn total_size(&self, filter: &MediaFilter) -> CuratorResult<i64>;

    /// The neighbors of `medium` in the view defined by filter and sort.
    fn adjacent_media(
        &self,
        medium: &Medium,
        filter: &MediaFilter,
        sort: &MediaSortField,
        order: SortOrder,
    ) -> CuratorResult<AdjacentMedia>;

    /// Distinct mimes present in the catalog.
    fn mimes(&self) -> CuratorResult<Vec<String>>;
}

/// Storage and querying of tag associations.
pub trait TagRepository {
    /// Replace the tag sets of `medium_ids` with `tags`.
    fn set_tags(&self, medium_ids: &[Id], tags: &[String]) -> CuratorResult<()>;

    /// Attach `tags` to each of `medium_ids`, skipping existing pairs.
    fn add_tags(&self, medium_ids: &[Id], tags: &[String]) -> CuratorResult<()>;

    /// Detach `tags` from `medium_ids`, or every tag if `tags` is empty.
    fn remove_tags(&self, medium_ids: &[Id], tags: &[String]) -> CuratorResult<()>;

    /// Remove `tags` from every medium.
    fn delete_tags(&self, tags: &[String]) -> CuratorResult<()>;

    /// Tag association rows matching `filter`.
    fn search_tags(
        &self,
        filter: &TagFilter,
        sort: TagSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<Tag>>;

    /// Number of tag association rows matching `filter`.
    fn count_tags(&self, filter: &TagFilter) -> CuratorResult<i64>;

    /// Attach sorted tag lists to each medium in one query.
    fn populate_media_tags(&self, media: &mut [Medium]) -> CuratorResult<()>;

    /// Tags with the number of media carrying each.
    fn search_tag_counts(
        &self,
        filter: &TagCountFilter,
        sort: TagCountSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<TagCount>>;

    /// Number of distinct tags matching `filter`.
    fn count_unique_tags(&self, filter: &TagCountFilter) -> CuratorResult<i64>;
}

/// Storage and querying of likes.
pub trait LikeRepository {
    /// Record `user_id` liking `medium_id`.
    fn create_like(&self, medium_id: &Id, user_id: &Id) -> CuratorResult<Like> {
        self.create_like_from(LikeDraft::new(*medium_id, *user_id))
    }

    /// Record a like with optional explicit id and time.
    ///
    /// Fails with a collision error if the id already exists.
    fn create_like_from(&self, draft: LikeDraft) -> CuratorResult<Like>;

    /// Fetch one like.
    fn get_like(&self, id: &Id) -> CuratorResult<Option<Like>>;

    /// Likes matching `filter`, ordered and windowed.
    fn search_likes(
        &self,
        filter: &LikeFilter,
        sort: LikeSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<Like>>;

    /// Number of likes matching `filter`.
    fn count_likes(&self, filter: &LikeFilter) -> CuratorResult<i64>;

    /// Delete one like.
    fn delete_like(&self, id: &Id) -> CuratorResult<()>;

    /// Delete every like from `user_id`.
    fn delete_user_likes(&self, user_id: &Id) -> CuratorResult<()>;
}
