//! Deterministic pagination over an already-ordered sequence.
//!
//! Pages are 1-based. A page past the end is empty rather than an error, and
//! the reported page count never drops below 1.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// A validated page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  page_size: usize,
  page:      usize,
}

impl PageRequest {
  /// Fails with [`Error::InvalidPageSize`] when `page_size` is 0.
  pub fn new(page_size: usize, page: usize) -> Result<Self> {
    if page_size == 0 {
      return Err(Error::InvalidPageSize);
    }
    Ok(Self { page_size, page })
  }

  pub fn page_size(&self) -> usize { self.page_size }

  pub fn page(&self) -> usize { self.page }

  /// The `[start, end)` index range this page covers within `len` items.
  /// Empty when the page lies beyond the end or is 0.
  pub fn bounds(&self, len: usize) -> (usize, usize) {
    if self.page == 0 {
      return (0, 0);
    }
    let start = (self.page - 1).saturating_mul(self.page_size).min(len);
    let end = self.page.saturating_mul(self.page_size).min(len);
    (start, end)
  }

  /// Borrow this page's slice of `items`.
  pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
    let (start, end) = self.bounds(items.len());
    &items[start..end]
  }
}

impl Default for PageRequest {
  fn default() -> Self { Self { page_size: DEFAULT_PAGE_SIZE, page: 1 } }
}

/// `ceil(len / page_size)`, but never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
  if page_size == 0 {
    return 1;
  }
  len.div_ceil(page_size).max(1)
}

/// One page of results plus the bookkeeping a pager widget needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub page:        usize,
  pub page_size:   usize,
  pub total_items: usize,
  pub total_pages: usize,
}

impl<T> Page<T> {
  /// Cut `request`'s page out of `items`, consuming the rest.
  pub fn paginate(items: Vec<T>, request: PageRequest) -> Self {
    let total_items = items.len();
    let (start, end) = request.bounds(total_items);
    let items = items.into_iter().skip(start).take(end - start).collect();
    Self {
      items,
      page: request.page,
      page_size: request.page_size,
      total_items,
      total_pages: total_pages(total_items, request.page_size),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn eighty_five_items_in_pages_of_forty() {
    let items: Vec<usize> = (0..85).collect();

    let first = PageRequest::new(40, 1).unwrap();
    assert_eq!(first.slice(&items), &items[0..40]);

    let third = PageRequest::new(40, 3).unwrap();
    assert_eq!(third.slice(&items), &items[80..85]);
    assert_eq!(third.slice(&items).len(), 5);

    let fourth = PageRequest::new(40, 4).unwrap();
    assert!(fourth.slice(&items).is_empty());

    assert_eq!(total_pages(items.len(), 40), 3);
  }

  #[test]
  fn empty_input_still_has_one_page() {
    assert_eq!(total_pages(0, 40), 1);
    let page = Page::paginate(Vec::<u8>::new(), PageRequest::default());
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_items, 0);
  }

  #[test]
  fn exact_multiple_does_not_add_a_page() {
    assert_eq!(total_pages(80, 40), 2);
    assert_eq!(total_pages(81, 40), 3);
  }

  #[test]
  fn zero_page_size_is_rejected() {
    assert!(matches!(PageRequest::new(0, 1), Err(Error::InvalidPageSize)));
  }

  #[test]
  fn page_zero_is_empty() {
    let items = [1, 2, 3];
    assert!(PageRequest::new(2, 0).unwrap().slice(&items).is_empty());
  }

  #[test]
  fn paginate_reports_bookkeeping() {
    let page = Page::paginate((0..85).collect::<Vec<_>>(), PageRequest::new(40, 3).unwrap());
    assert_eq!(page.items, vec![80, 81, 82, 83, 84]);
    assert_eq!(page.page, 3);
    assert_eq!(page.page_size, 40);
    assert_eq!(page.total_items, 85);
    assert_eq!(page.total_pages, 3);
  }
}
