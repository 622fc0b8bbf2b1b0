//! Offset pagination: `page` / `rows` to `take` / `skip`.
//!
//! | `page` | `rows` | `take` | `skip` |
//! |--------|--------|--------|--------|
//! | unset  | unset  | 10     | 0      |
//! | unset  | `r`    | `r`    | 0      |
//! | `p`    | unset  | 10     | `10 * (p - 1)` |
//! | `p`    | `r`    | `r`    | `r * (p - 1)`  |
//!
//! Out-of-range input (`page = 0`) never panics; it saturates to `skip = 0`.
//! Reporting it is the validator's job.
//!
//! # Example
//!
//! ```
//! use mik_filter::Pagination;
//!
//! let p = Pagination::resolve(Some(2), Some(25));
//! assert_eq!((p.take, p.skip), (25, 25));
//! ```

mod page_info;

pub use page_info::PageInfo;

/// Page size used when `rows` is unset.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Resolved `take` / `skip` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of records to return.
    pub take: u64,
    /// Number of records to skip.
    pub skip: u64,
}

impl Pagination {
    /// Resolve pagination from the request's `page` and `rows`.
    #[must_use]
    pub fn resolve(page: Option<u32>, rows: Option<u32>) -> Self {
        let take = u64::from(rows.unwrap_or(DEFAULT_PAGE_SIZE));
        let skip = page.map_or(0, |page| u64::from(page.saturating_sub(1)) * take);
        Self { take, skip }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
