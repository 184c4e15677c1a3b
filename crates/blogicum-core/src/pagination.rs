//! Fixed-size pagination for post listings.

use serde::Serialize;

use crate::error::DomainError;

/// Number of posts shown on one page of any feed.
pub const POSTS_PER_PAGE: u64 = 10;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Page 0 and pages whose offset does not fit in a `u64` are NotFound.
    pub fn new(number: u64) -> Result<Self, DomainError> {
        let offset = number
            .checked_sub(1)
            .and_then(|n| n.checked_mul(POSTS_PER_PAGE));
        if offset.is_none() {
            return Err(DomainError::not_found("page", number));
        }
        Ok(Self {
            number,
            size: POSTS_PER_PAGE,
        })
    }

    pub fn first() -> Self {
        Self {
            number: 1,
            size: POSTS_PER_PAGE,
        }
    }

    pub fn offset(&self) -> u64 {
        self.number
            .saturating_sub(1)
            .checked_mul(self.size)
            .unwrap_or(u64::MAX)
    }
}

/// One page of results plus the totals needed to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// An empty listing still has one (empty) page.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let num_pages = total_items.div_ceil(request.size).max(1);
        Self {
            items,
            number: request.number,
            num_pages,
            total_items,
            has_next: request.number < num_pages,
            has_previous: request.number > 1,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.number > self.num_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_zero_is_not_found() {
        assert!(matches!(
            PageRequest::new(0),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_page_with_overflowing_offset_is_not_found() {
        assert!(matches!(
            PageRequest::new(u64::MAX),
            Err(DomainError::NotFound { .. })
        ));
        assert!(PageRequest::new(u64::MAX / POSTS_PER_PAGE).is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::first().offset(), 0);
        assert_eq!(PageRequest::new(3).unwrap().offset(), 20);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let page: Page<u8> = Page::new(vec![], PageRequest::first(), 0);
        assert_eq!(page.num_pages, 1);
        assert!(!page.is_out_of_range());
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_num_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(2).unwrap(), 21);
        assert_eq!(page.num_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);

        let past_end: Page<u8> = Page::new(vec![], PageRequest::new(4).unwrap(), 21);
        assert!(past_end.is_out_of_range());
    }
}
