//! Like events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Id;

/// One user liking one medium.
///
/// Likes are append-only; the same user may like a medium more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Like {
    /// Unique identifier
    id: Id,
    /// Unix seconds when the like was recorded
    creation_time: i64,
    /// Liked medium
    medium_id: Id,
    /// Liking user
    user_id: Id,
}

impl Like {
    /// Assemble a like from stored values.
    pub fn new(id: Id, creation_time: i64, medium_id: Id, user_id: Id) -> Self {
        Self {
            id,
            creation_time,
            medium_id,
            user_id,
        }
    }

    /// Creation time as a UTC datetime.
    pub fn creation_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.creation_time, 0)
    }
}

/// Fields for a new like; id and time default to fresh values.
#[derive(Debug, Clone, PartialEq, Eq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct LikeDraft {
    /// Explicit identifier
    pub id: Option<Id>,
    /// Explicit creation time
    pub creation_time: Option<i64>,
    /// Liked medium
    #[setters(skip)]
    pub medium_id: Id,
    /// Liking user
    #[setters(skip)]
    pub user_id: Id,
}

impl LikeDraft {
    /// Start a draft for `user_id` liking `medium_id`.
    pub fn new(medium_id: Id, user_id: Id) -> Self {
        Self {
            id: None,
            creation_time: None,
            medium_id,
            user_id,
        }
    }

    /// Resolve defaults into a like.
    pub fn into_like(self, now: i64) -> Like {
        Like::new(
            self.id.unwrap_or_else(Id::generate),
            self.creation_time.unwrap_or(now),
            self.medium_id,
            self.user_id,
        )
    }
}
