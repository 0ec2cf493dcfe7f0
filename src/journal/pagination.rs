use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{JournalError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Slice `items` into 1-based pages. A page past the end is empty, not an
/// error; `page` or `page_size` of zero is rejected.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Result<PageResult<T>> {
    if page == 0 {
        return Err(JournalError::invalid_argument("page", "must be at least 1"));
    }
    if page_size == 0 {
        return Err(JournalError::invalid_argument("page_size", "must be at least 1"));
    }

    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size).max(1);

    let start = (page - 1).saturating_mul(page_size).min(total_count);
    let end = start.saturating_add(page_size).min(total_count);

    Ok(PageResult {
        items: items[start..end].to_vec(),
        total_count,
        total_pages,
        current_page: page,
    })
}

/// `page` / `per_page` as read from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    pub fn from_query(params: &HashMap<String, String>, default_per_page: usize) -> Result<Self> {
        Ok(Self {
            page: positive_param(params, "page", 1)?,
            per_page: positive_param(params, "per_page", default_per_page)?,
        })
    }
}

fn positive_param(params: &HashMap<String, String>, key: &str, default: usize) -> Result<usize> {
    let raw = match params.get(key) {
        Some(raw) => raw,
        None => return Ok(default),
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| JournalError::invalid_argument(key, format!("'{}' is not an integer", raw)))?;
    if value <= 0 {
        return Err(JournalError::invalid_argument(
            key,
            format!("must be positive, got {}", value),
        ));
    }
    usize::try_from(value)
        .map_err(|_| JournalError::invalid_argument(key, format!("{} is out of range", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_one_page() {
        let page = paginate::<u32>(&[], 1, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn last_partial_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 3, 10).unwrap();
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 7, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 7);
        assert_eq!(page.total_pages, 3);

        // no overflow on absurd page numbers
        let page = paginate(&items, usize::MAX, 10).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn pages_cover_every_item_once() {
        let items: Vec<u32> = (0..37).collect();
        for size in 1..=40 {
            let first = paginate(&items, 1, size).unwrap();
            let collected: Vec<u32> = (1..=first.total_pages)
                .flat_map(|p| paginate(&items, p, size).unwrap().items)
                .collect();
            assert_eq!(collected, items, "page size {}", size);
        }
    }

    #[test]
    fn zero_arguments_are_rejected() {
        let err = paginate(&[1, 2, 3], 0, 10).unwrap_err();
        assert!(matches!(err, JournalError::InvalidArgument { ref name, .. } if name == "page"));
        let err = paginate(&[1, 2, 3], 1, 0).unwrap_err();
        assert!(matches!(err, JournalError::InvalidArgument { ref name, .. } if name == "page_size"));
    }

    #[test]
    fn page_request_from_query() {
        let mut params = HashMap::new();
        assert_eq!(
            PageRequest::from_query(&params, 10).unwrap(),
            PageRequest::new(1, 10)
        );

        params.insert("page".to_string(), "4".to_string());
        params.insert("per_page".to_string(), "25".to_string());
        assert_eq!(
            PageRequest::from_query(&params, 10).unwrap(),
            PageRequest::new(4, 25)
        );

        params.insert("page".to_string(), "-1".to_string());
        assert!(PageRequest::from_query(&params, 10).is_err());

        params.insert("page".to_string(), "two".to_string());
        assert!(PageRequest::from_query(&params, 10).is_err());
    }
}
