//! Pagination parameters and navigation links.
//!
//! This module parses the JSON:API page query parameters into [`PageParams`]
//! and turns them into list windows and top-level `first`/`prev`/`next`/
//! `last` document links. Two parameter schemes are supported:
//!
//! - `page[number]` / `page[size]` — 1-indexed pages of a fixed size
//! - `page[offset]` / `page[limit]` — an explicit element window
//!
//! Incomplete or zero-valued parameters are refused with an explicit
//! [`InvalidPagination`](crate::error::DocumentError::InvalidPagination)
//! error; in particular a `page[size]` without a `page[number]` is an error,
//! never an implied first page.

use std::collections::BTreeMap;

use crate::document::{Link, Links};
use crate::error::{DocumentError, DocumentResult};

/// Query parameter naming the 1-indexed page.
pub const PAGE_NUMBER: &str = "page[number]";
/// Query parameter naming the page size.
pub const PAGE_SIZE: &str = "page[size]";
/// Query parameter naming the element offset.
pub const PAGE_OFFSET: &str = "page[offset]";
/// Query parameter naming the element limit.
pub const PAGE_LIMIT: &str = "page[limit]";

/// A validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParams {
    /// Fixed-size pages, 1-indexed.
    NumberSize {
        /// The page number, at least 1.
        number: u64,
        /// Elements per page, at least 1.
        size: u64,
    },
    /// An explicit element window.
    OffsetLimit {
        /// Elements to skip.
        offset: u64,
        /// Elements to take, at least 1.
        limit: u64,
    },
}

impl PageParams {
    /// Parses pagination parameters from query parameters.
    ///
    /// Returns `Ok(None)` when no page parameters are present (an
    /// unpaginated request).
    ///
    /// # Errors
    ///
    /// Returns an invalid-pagination error when a parameter does not parse
    /// as an unsigned integer, when one half of a parameter pair is missing,
    /// or when `page[number]`, `page[size]`, or `page[limit]` is zero.
    pub fn from_query(query: &BTreeMap<String, String>) -> DocumentResult<Option<Self>> {
        let number = parse_param(query, PAGE_NUMBER)?;
        let size = parse_param(query, PAGE_SIZE)?;
        let offset = parse_param(query, PAGE_OFFSET)?;
        let limit = parse_param(query, PAGE_LIMIT)?;

        if let Some(size) = size {
            let Some(number) = number else {
                return Err(DocumentError::InvalidPagination(format!(
                    "{PAGE_SIZE} given without {PAGE_NUMBER}"
                )));
            };
            if number == 0 {
                return Err(DocumentError::InvalidPagination(format!(
                    "{PAGE_NUMBER} must be at least 1"
                )));
            }
            if size == 0 {
                return Err(DocumentError::InvalidPagination(format!(
                    "{PAGE_SIZE} must be at least 1"
                )));
            }
            return Ok(Some(Self::NumberSize { number, size }));
        }

        if number.is_some() {
            return Err(DocumentError::InvalidPagination(format!(
                "{PAGE_NUMBER} given without {PAGE_SIZE}"
            )));
        }

        match (offset, limit) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(DocumentError::InvalidPagination(format!(
                "{PAGE_OFFSET} given without {PAGE_LIMIT}"
            ))),
            (None, Some(_)) => Err(DocumentError::InvalidPagination(format!(
                "{PAGE_LIMIT} given without {PAGE_OFFSET}"
            ))),
            (Some(_), Some(0)) => Err(DocumentError::InvalidPagination(format!(
                "{PAGE_LIMIT} must be at least 1"
            ))),
            (Some(offset), Some(limit)) => Ok(Some(Self::OffsetLimit { offset, limit })),
        }
    }

    /// Returns the clamped `[start, end)` window into a list of `total`
    /// elements.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let (start, len) = match *self {
            Self::NumberSize { number, size } => {
                (number.saturating_sub(1).saturating_mul(size), size)
            }
            Self::OffsetLimit { offset, limit } => (offset, limit),
        };

        let start = usize::try_from(start).unwrap_or(usize::MAX).min(total);
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        (start, start.saturating_add(len).min(total))
    }

    /// Returns the window of `items` selected by these parameters.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds(items.len());
        &items[start..end]
    }

    /// Builds the `first`/`prev`/`next`/`last` navigation links for a list
    /// of `total` elements.
    ///
    /// `first` and `prev` are only present when there are preceding pages,
    /// `next` and `last` only when elements remain past this page.
    pub fn links(&self, base_url: &str, total: u64) -> Links {
        let mut links = Links::new();

        match *self {
            Self::NumberSize { number, size } => {
                let last = total.div_ceil(size.max(1));
                if number > 1 {
                    links.insert("first".to_string(), number_size_link(base_url, 1, size));
                    links.insert(
                        "prev".to_string(),
                        number_size_link(base_url, number - 1, size),
                    );
                }
                if number < last {
                    links.insert(
                        "next".to_string(),
                        number_size_link(base_url, number + 1, size),
                    );
                    links.insert("last".to_string(), number_size_link(base_url, last, size));
                }
            }
            Self::OffsetLimit { offset, limit } => {
                if offset > 0 {
                    links.insert("first".to_string(), offset_limit_link(base_url, 0, limit));
                    links.insert(
                        "prev".to_string(),
                        offset_limit_link(base_url, offset.saturating_sub(limit), limit),
                    );
                }
                if offset.saturating_add(limit) < total {
                    let remainder = total % limit.max(1);
                    let last = if remainder == 0 {
                        total.saturating_sub(limit)
                    } else {
                        total - remainder
                    };
                    links.insert(
                        "next".to_string(),
                        offset_limit_link(base_url, offset + limit, limit),
                    );
                    links.insert("last".to_string(), offset_limit_link(base_url, last, limit));
                }
            }
        }

        links
    }
}

fn parse_param(query: &BTreeMap<String, String>, key: &str) -> DocumentResult<Option<u64>> {
    match query.get(key) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            DocumentError::InvalidPagination(format!("{key} is not an unsigned integer: {value}"))
        }),
    }
}

fn number_size_link(base_url: &str, number: u64, size: u64) -> Link {
    Link::new(format!(
        "{base_url}?{PAGE_NUMBER}={number}&{PAGE_SIZE}={size}"
    ))
}

fn offset_limit_link(base_url: &str, offset: u64, limit: u64) -> Link {
    Link::new(format!(
        "{base_url}?{PAGE_OFFSET}={offset}&{PAGE_LIMIT}={limit}"
    ))
}
