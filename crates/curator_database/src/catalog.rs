//! SQLite implementation of the catalog repositories.

use std::sync::{Arc, Mutex, MutexGuard};

use curator_core::{
    AdjacentMedia, Id, Like, LikeDraft, Medium, MediumDraft, MediumUpdate, Tag, TagCount,
    now_timestamp,
};
use curator_error::{CuratorResult, DatabaseError, DatabaseErrorKind};
use curator_interface::{
    LikeFilter, LikeRepository, LikeSortField, MediaFilter, MediaRepository, MediaSortField,
    Page, SortOrder, TagCountFilter, TagCountSortField, TagFilter, TagRepository, TagSortField,
};
use diesel::sqlite::SqliteConnection;
use tracing::{info, instrument};

use crate::random_order::{RandomOrderStrategy, strategy_for};
use crate::{CatalogConfig, adjacency, connection, likes, media, tags};

/// Media catalog stored in SQLite using Diesel.
///
/// All repository calls serialize on a single connection. Clones share
/// that connection.
///
/// # Example
///
/// ```
/// use curator_core::MediumDraft;
/// use curator_database::SqliteCatalog;
/// use curator_interface::MediaRepository;
///
/// let catalog = SqliteCatalog::in_memory().unwrap();
/// let medium = catalog
///     .create_medium(MediumDraft::default().with_mime("image/png"))
///     .unwrap();
/// assert_eq!(catalog.get_medium(&medium.id).unwrap(), Some(medium));
/// ```
#[derive(Clone)]
pub struct SqliteCatalog {
    conn: Arc<Mutex<SqliteConnection>>,
    random: Arc<dyn RandomOrderStrategy>,
}

impl std::fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCatalog")
            .field("random", &self.random)
            .finish_non_exhaustive()
    }
}

impl SqliteCatalog {
    /// Open the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    #[instrument(skip(config), fields(url = %config.database_url()))]
    pub fn open(config: &CatalogConfig) -> CuratorResult<Self> {
        let mut conn = connection::establish_connection(config.database_url())?;
        if *config.run_migrations() {
            connection::run_migrations(&mut conn)?;
        }
        info!("Opened catalog");
        Ok(Self::from_connection(
            conn,
            strategy_for(config.random_ordering(), *config.synthetic_key_segments()),
        ))
    }

    /// A migrated, empty in-memory catalog.
    pub fn in_memory() -> CuratorResult<Self> {
        Self::open(&CatalogConfig::default())
    }

    /// Wrap an established connection.
    pub fn from_connection(conn: SqliteConnection, random: Arc<dyn RandomOrderStrategy>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            random,
        }
    }

    /// Replace the random-order strategy.
    pub fn with_random_strategy(mut self, random: Arc<dyn RandomOrderStrategy>) -> Self {
        self.random = random;
        self
    }

    /// Create the catalog tables if missing.
    pub fn install(&self) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        Ok(connection::run_migrations(&mut conn)?)
    }

    /// Drop the catalog tables.
    pub fn uninstall(&self) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        Ok(connection::revert_migrations(&mut conn)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, SqliteConnection>, DatabaseError> {
        self.conn.lock().map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Connection(format!(
                "Connection lock poisoned: {}",
                e
            )))
        })
    }
}

impl MediaRepository for SqliteCatalog {
    #[instrument(skip(self, draft))]
    fn create_medium(&self, draft: MediumDraft) -> CuratorResult<Medium> {
        let medium = Medium::from_draft(draft, now_timestamp())?;
        let mut conn = self.lock()?;
        media::insert_medium(&mut conn, &medium)?;
        Ok(medium)
    }

    fn get_medium(&self, id: &Id) -> CuratorResult<Option<Medium>> {
        let mut conn = self.lock()?;
        media::find_medium(&mut conn, id)
    }

    fn update_medium(&self, id: &Id, update: MediumUpdate) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        media::update_medium(&mut conn, id, update, now_timestamp())
    }

    fn delete_medium(&self, id: &Id) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        media::delete_medium(&mut conn, id)
    }

    #[instrument(skip_all, fields(sort = %sort, order = %order))]
    fn search_media(
        &self,
        filter: &MediaFilter,
        sort: &MediaSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<Medium>> {
        let mut conn = self.lock()?;
        media::search_media(&mut conn, filter, sort, order, page, self.random.as_ref())
    }

    fn count_media(&self, filter: &MediaFilter) -> CuratorResult<i64> {
        let mut conn = self.lock()?;
        media::count_media(&mut conn, filter)
    }

    fn total_size(&self, filter: &MediaFilter) -> CuratorResult<i64> {
        let mut conn = self.lock()?;
        media::total_size(&mut conn, filter)
    }

    fn adjacent_media(
        &self,
        medium: &Medium,
        filter: &MediaFilter,
        sort: &MediaSortField,
        order: SortOrder,
    ) -> CuratorResult<AdjacentMedia> {
        let mut conn = self.lock()?;
        adjacency::adjacent_media(&mut conn, medium, filter, sort, order, self.random.as_ref())
    }

    fn mimes(&self) -> CuratorResult<Vec<String>> {
        let mut conn = self.lock()?;
        media::mimes(&mut conn)
    }
}

impl TagRepository for SqliteCatalog {
    fn set_tags(&self, medium_ids: &[Id], tags: &[String]) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        tags::set_tags(&mut conn, medium_ids, tags)
    }

    fn add_tags(&self, medium_ids: &[Id], tags: &[String]) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        tags::add_tags(&mut conn, medium_ids, tags)
    }

    fn remove_tags(&self, medium_ids: &[Id], tags: &[String]) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        tags::remove_tags(&mut conn, medium_ids, tags)
    }

    fn delete_tags(&self, tags: &[String]) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        tags::delete_tags(&mut conn, tags)
    }

    fn search_tags(
        &self,
        filter: &TagFilter,
        sort: TagSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<Tag>> {
        let mut conn = self.lock()?;
        tags::search_tags(&mut conn, filter, sort, order, page)
    }

    fn count_tags(&self, filter: &TagFilter) -> CuratorResult<i64> {
        let mut conn = self.lock()?;
        tags::count_tags(&mut conn, filter)
    }

    fn populate_media_tags(&self, media: &mut [Medium]) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        tags::populate_media_tags(&mut conn, media)
    }

    fn search_tag_counts(
        &self,
        filter: &TagCountFilter,
        sort: TagCountSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<TagCount>> {
        let mut conn = self.lock()?;
        tags::search_tag_counts(&mut conn, filter, sort, order, page)
    }

    fn count_unique_tags(&self, filter: &TagCountFilter) -> CuratorResult<i64> {
        let mut conn = self.lock()?;
        tags::count_unique_tags(&mut conn, filter)
    }
}

impl LikeRepository for SqliteCatalog {
    fn create_like_from(&self, draft: LikeDraft) -> CuratorResult<Like> {
        let like = draft.into_like(now_timestamp());
        let mut conn = self.lock()?;
        likes::insert_like(&mut conn, &like)?;
        Ok(like)
    }

    fn get_like(&self, id: &Id) -> CuratorResult<Option<Like>> {
        let mut conn = self.lock()?;
        likes::find_like(&mut conn, id)
    }

    fn search_likes(
        &self,
        filter: &LikeFilter,
        sort: LikeSortField,
        order: SortOrder,
        page: Page,
    ) -> CuratorResult<Vec<Like>> {
        let mut conn = self.lock()?;
        likes::search_likes(&mut conn, filter, sort, order, page)
    }

    fn count_likes(&self, filter: &LikeFilter) -> CuratorResult<i64> {
        let mut conn = self.lock()?;
        likes::count_likes(&mut conn, filter)
    }

    fn delete_like(&self, id: &Id) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        likes::delete_like(&mut conn, id)
    }

    fn delete_user_likes(&self, user_id: &Id) -> CuratorResult<()> {
        let mut conn = self.lock()?;
        likes::delete_user_likes(&mut conn, user_id)
    }
}
