//! Page-at-a-time iteration over Strava list endpoints.

use crate::api::ApiError;

/// Largest page the Strava API serves.
pub const MAX_PER_PAGE: usize = 200;

type FetchPage<'a, T> = Box<dyn FnMut(usize, usize) -> Result<Vec<T>, ApiError> + 'a>;

/// Iterator that requests pages lazily as items are consumed.
///
/// The page fetcher receives a 1-based page number and the page size. Iteration
/// stops after a short page, after `limit` items, or after the first error.
pub struct Pages<'a, T> {
    fetch_page: FetchPage<'a, T>,
    per_page: usize,
    next_page: usize,
    buffer: std::vec::IntoIter<T>,
    remaining: Option<usize>,
    exhausted: bool,
}

impl<'a, T> Pages<'a, T> {
    pub fn new<F>(limit: Option<usize>, fetch_page: F) -> Self
    where
        F: FnMut(usize, usize) -> Result<Vec<T>, ApiError> + 'a,
    {
        let per_page = limit.map_or(MAX_PER_PAGE, |l| l.clamp(1, MAX_PER_PAGE));
        Self {
            fetch_page: Box::new(fetch_page),
            per_page,
            next_page: 1,
            buffer: Vec::new().into_iter(),
            remaining: limit,
            exhausted: false,
        }
    }
}

impl<T> Iterator for Pages<'_, T> {
    type Item = Result<T, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        loop {
            if let Some(item) = self.buffer.next() {
                if let Some(n) = self.remaining.as_mut() {
                    *n -= 1;
                }
                return Some(Ok(item));
            }
            if self.exhausted {
                return None;
            }
            match (self.fetch_page)(self.next_page, self.per_page) {
                Ok(items) => {
                    if items.len() < self.per_page {
                        self.exhausted = true;
                    }
                    self.next_page += 1;
                    self.buffer = items.into_iter();
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn numbered(total: usize) -> impl FnMut(usize, usize) -> Result<Vec<usize>, ApiError> {
        move |page, per_page| {
            let start = (page - 1) * per_page;
            Ok((start..total.min(start + per_page)).collect())
        }
    }

    #[test]
    fn unbounded_reads_until_short_page() {
        let items: Vec<usize> = Pages::new(None, numbered(450))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(items.len(), 450);
        assert_eq!(items[449], 449);
    }

    #[test]
    fn limit_caps_page_size_and_count() {
        let requested = RefCell::new(Vec::new());
        let mut inner = numbered(450);
        let items: Vec<usize> = Pages::new(Some(3), |page, per_page| {
            requested.borrow_mut().push(per_page);
            inner(page, per_page)
        })
        .collect::<Result<_, _>>()
        .unwrap();
        assert_eq!(items, vec![0, 1, 2]);
        assert_eq!(*requested.borrow(), vec![3]);
    }

    #[test]
    fn limit_larger_than_page_spans_pages() {
        let requested = RefCell::new(Vec::new());
        let mut inner = numbered(1000);
        let items: Vec<usize> = Pages::new(Some(250), |page, per_page| {
            requested.borrow_mut().push(page);
            inner(page, per_page)
        })
        .collect::<Result<_, _>>()
        .unwrap();
        assert_eq!(items.len(), 250);
        assert_eq!(*requested.borrow(), vec![1, 2]);
    }

    #[test]
    fn pages_are_fetched_lazily() {
        let requested = RefCell::new(0);
        let mut inner = numbered(1000);
        let mut pages = Pages::new(None, |page, per_page| {
            *requested.borrow_mut() += 1;
            inner(page, per_page)
        });
        assert_eq!(*requested.borrow(), 0);
        pages.next();
        assert_eq!(*requested.borrow(), 1);
    }

    #[test]
    fn error_ends_iteration() {
        let mut pages: Pages<'_, usize> =
            Pages::new(None, |_, _| Err(ApiError::Network("offline".into())));
        assert!(matches!(pages.next(), Some(Err(ApiError::Network(_)))));
        assert!(pages.next().is_none());
    }

    #[test]
    fn empty_listing() {
        let mut pages = Pages::new(None, numbered(0));
        assert!(pages.next().is_none());
    }
}
