//! Offset/limit windowing.

use serde::{Deserialize, Serialize};

/// A zero-indexed page of results.
///
/// Without a size the page is unlimited and the number is ignored.
///
/// # Examples
///
/// ```
/// use curator_interface::Page;
///
/// let page = Page::new(1, 3);
/// assert_eq!(page.offset(), 3);
/// assert_eq!(page.limit(), Some(3));
/// assert_eq!(Page::all().limit(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// Zero-indexed page number
    #[serde(default)]
    pub number: u64,
    /// Rows per page, unlimited when absent
    #[serde(default)]
    pub size: Option<u64>,
}

impl Page {
    /// Page `number` of `size` rows.
    pub fn new(number: u64, size: u64) -> Self {
        Self {
            number,
            size: Some(size),
        }
    }

    /// Every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Maximum rows returned.
    pub fn limit(&self) -> Option<u64> {
        self.size
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        self.size
            .map(|size| self.number.saturating_mul(size))
            .unwrap_or(0)
    }
}
