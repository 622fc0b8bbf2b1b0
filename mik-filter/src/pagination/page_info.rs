//! PageInfo struct for offset-paginated responses.

use super::Pagination;

/// Page information for paginated responses.
///
/// # Example
///
/// ```
/// use mik_filter::{PageInfo, Pagination};
///
/// let pagination = Pagination::resolve(Some(2), Some(10));
/// let info = PageInfo::new(10, pagination).with_total(35);
///
/// assert_eq!(info.page, 2);
/// assert_eq!(info.total_pages, Some(4));
/// assert!(info.has_next);
/// assert!(info.has_prev);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    /// 1-based page number these results belong to.
    pub page: u64,
    /// Whether there are more items after this page.
    pub has_next: bool,
    /// Whether there are items before this page.
    pub has_prev: bool,
    /// Total count (if available).
    pub total: Option<u64>,
    /// Number of pages (if the total is known).
    pub total_pages: Option<u64>,
    take: u64,
    skip: u64,
}

impl PageInfo {
    /// Create page info based on the returned count vs the requested page.
    ///
    /// If `count >= take`, assumes there are more items.
    #[must_use]
    pub fn new(count: usize, pagination: Pagination) -> Self {
        let Pagination { take, skip } = pagination;
        Self {
            page: if take == 0 { 1 } else { skip / take + 1 },
            has_next: take > 0 && count as u64 >= take,
            has_prev: skip > 0,
            total: None,
            total_pages: None,
            take,
            skip,
        }
    }

    /// Set the total count; refines `has_next` and fills `total_pages`.
    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self.has_next = self.skip.saturating_add(self.take) < total;
        self.total_pages = (self.take > 0).then(|| total.div_ceil(self.take));
        self
    }
}
