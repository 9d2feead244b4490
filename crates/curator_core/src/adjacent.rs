//! Neighbor pair returned by adjacent navigation.

use serde::{Deserialize, Serialize};

use crate::Medium;

/// The media immediately before and after a reference medium in a view.
///
/// `None` on either side means the reference is at that boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjacentMedia {
    /// Predecessor in the view
    pub prev: Option<Medium>,
    /// Successor in the view
    pub next: Option<Medium>,
}

impl AdjacentMedia {
    /// Identifier of the predecessor, if any.
    pub fn prev_id(&self) -> Option<crate::Id> {
        self.prev.as_ref().map(|medium| medium.id)
    }

    /// Identifier of the successor, if any.
    pub fn next_id(&self) -> Option<crate::Id> {
        self.next.as_ref().map(|medium| medium.id)
    }
}
