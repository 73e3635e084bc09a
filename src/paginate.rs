use std::str::FromStr;

use crate::error::InputError;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    pub page: usize,
}

impl<T> Page<'_, T> {
    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Force `requested` into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.max(1).min(total_pages.max(1))
}

/// Slice `items` into the (clamped) requested page.
pub fn paginate<T>(items: &[T], page_size: usize, requested: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(requested, total_pages);
    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    Page {
        items: &items[start..end],
        total_pages,
        page,
    }
}

/// Pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    First,
    Prev,
    Next,
    Last,
}

impl Nav {
    /// Target page, or `None` when the control is disabled at this boundary.
    pub fn target(self, current: usize, total_pages: usize) -> Option<usize> {
        let at_first = current <= 1;
        let at_last = current >= total_pages;
        match self {
            Nav::First if !at_first => Some(1),
            Nav::Prev if !at_first => Some(current - 1),
            Nav::Next if !at_last => Some(current + 1),
            Nav::Last if !at_last => Some(total_pages),
            _ => None,
        }
    }
}

impl FromStr for Nav {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f" | "first" => Ok(Nav::First),
            "p" | "prev" => Ok(Nav::Prev),
            "n" | "next" => Ok(Nav::Next),
            "l" | "last" => Ok(Nav::Last),
            other => Err(InputError::Unknown(other.to_string())),
        }
    }
}
