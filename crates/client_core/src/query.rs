//! Browsing state and the remote query shape it resolves to.

use std::str::FromStr;

use shared::domain::{CategorySlug, SortKey, SortOrder};
use thiserror::Error;

/// Page length of the product listing.
pub const PRODUCTS_PER_PAGE: u32 = 9;
/// Page length of the featured strip.
pub const FEATURED_PAGE_SIZE: u32 = 4;
/// Default offset of the featured strip, so it differs from the first listing page.
pub const FEATURED_OFFSET: u32 = 10;

/// The active narrowing of the listing.
///
/// The remote source cannot combine a category filter with a sort, so the two
/// live in one enum and setting either replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    None,
    Category(CategorySlug),
    Sort { key: SortKey, order: SortOrder },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub(crate) page: u32,
    pub(crate) filter: Filter,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            filter: Filter::None,
        }
    }
}

impl QueryState {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn category(&self) -> Option<&CategorySlug> {
        match &self.filter {
            Filter::Category(slug) => Some(slug),
            _ => None,
        }
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        match self.filter {
            Filter::Sort { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Ascending unless a sort is active.
    pub fn sort_order(&self) -> SortOrder {
        match self.filter {
            Filter::Sort { order, .. } => order,
            _ => SortOrder::default(),
        }
    }

    /// Offset of the first item of the current page.
    pub fn offset(&self, page_size: u32) -> u32 {
        self.page.saturating_sub(1).saturating_mul(page_size)
    }
}

/// The one unambiguous request a [`QueryState`] maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySpec {
    ByCategory {
        slug: CategorySlug,
    },
    BySort {
        key: SortKey,
        order: SortOrder,
        page_size: u32,
        offset: u32,
    },
    ByPage {
        page_size: u32,
        offset: u32,
    },
}

impl QuerySpec {
    pub fn resolve(state: &QueryState, page_size: u32) -> Self {
        let offset = state.offset(page_size);
        match &state.filter {
            Filter::Category(slug) => QuerySpec::ByCategory { slug: slug.clone() },
            Filter::Sort { key, order } => QuerySpec::BySort {
                key: *key,
                order: *order,
                page_size,
                offset,
            },
            Filter::None => QuerySpec::ByPage { page_size, offset },
        }
    }

    /// The stateless featured strip.
    pub fn featured(offset: u32) -> Self {
        QuerySpec::ByPage {
            page_size: FEATURED_PAGE_SIZE,
            offset,
        }
    }

    pub fn is_paginated(&self) -> bool {
        !matches!(self, QuerySpec::ByCategory { .. })
    }

    /// Requested `(page_size, offset)`, absent for the category shape.
    pub fn window(&self) -> Option<(u32, u32)> {
        match self {
            QuerySpec::ByCategory { .. } => None,
            QuerySpec::BySort {
                page_size, offset, ..
            }
            | QuerySpec::ByPage { page_size, offset } => Some((*page_size, *offset)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option '{0}'; expected default, price-asc, price-desc, rating-asc or rating-desc")]
pub struct SortOptionError(String);

/// A user-facing sort choice such as `price-desc`; `default` keeps the
/// source's insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSelection {
    pub key: Option<SortKey>,
    pub order: SortOrder,
}

impl FromStr for SortSelection {
    type Err = SortOptionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() || normalized == "default" {
            return Ok(Self::default());
        }

        let (key, order) = normalized
            .split_once('-')
            .ok_or_else(|| SortOptionError(raw.to_string()))?;
        let key = match key {
            "price" => SortKey::Price,
            "rating" => SortKey::Rating,
            _ => return Err(SortOptionError(raw.to_string())),
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(SortOptionError(raw.to_string())),
        };
        Ok(Self {
            key: Some(key),
            order,
        })
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
