//! Catalog query controller: owns the listing's [`QueryState`], applies user
//! transitions, and stamps every issued query so late responses for a
//! superseded state are dropped instead of rendered.

use shared::{
    domain::{CategorySlug, SortKey, SortOrder},
    error::CatalogError,
    protocol::{Product, ProductPage},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    location::ListingLocation,
    pagination::Pagination,
    query::{Filter, QuerySpec, QueryState, PRODUCTS_PER_PAGE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { generation: u64 },
    Ready,
    Failed,
}

/// A [`QuerySpec`] stamped with the generation it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    spec: QuerySpec,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }
}

/// Direction of a one-page move from the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Previous,
    Next,
}

/// Why a one-page move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepRefused {
    #[error("Category results are shown on a single page.")]
    Unpaginated,
    #[error("Already on the first page.")]
    AtFirstPage,
    #[error("Already on the last page.")]
    AtLastPage,
}

/// Banner shown while a category filter is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStatus {
    pub slug: CategorySlug,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub products: Vec<Product>,
    pub pagination: Pagination,
    pub filter_status: Option<FilterStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Rendered(ListingView),
    Failed(CatalogError),
    /// The response belongs to a superseded query and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListingController {
    state: QueryState,
    page_size: u32,
    location: ListingLocation,
    generation: u64,
    known_total_pages: Option<u32>,
    load: LoadState,
}

impl ListingController {
    /// Opens the listing, seeding the category filter from the location.
    pub fn new(location: ListingLocation) -> Self {
        let filter = location
            .category()
            .map(Filter::Category)
            .unwrap_or_default();
        Self {
            state: QueryState { page: 1, filter },
            page_size: PRODUCTS_PER_PAGE,
            location,
            generation: 0,
            known_total_pages: None,
            load: LoadState::Idle,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn location(&self) -> &ListingLocation {
        &self.location
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    /// `None` clears the filter.
    pub fn set_category(&mut self, slug: Option<CategorySlug>) {
        self.state = QueryState {
            page: 1,
            filter: slug.map(Filter::Category).unwrap_or_default(),
        };
        self.sync_location();
        self.supersede();
    }

    /// `key = None` restores the source's insertion order.
    pub fn set_sort(&mut self, key: Option<SortKey>, order: SortOrder) {
        self.state = QueryState {
            page: 1,
            filter: key
                .map(|key| Filter::Sort { key, order })
                .unwrap_or_default(),
        };
        self.sync_location();
        self.supersede();
    }

    /// Clamped to `1..=total_pages` once a paginated response has reported a
    /// total.
    pub fn set_page(&mut self, page: u32) {
        let mut page = page.max(1);
        if let Some(total_pages) = self.known_total_pages {
            if page > total_pages.max(1) {
                warn!(
                    requested = page,
                    total_pages, "requested page is past the end; clamping"
                );
                page = total_pages.max(1);
            }
        }
        self.state.page = page;
        self.supersede();
    }

    /// Moves one page from the current state. Page counts come from the last
    /// paginated response; the unfiltered and sorted feeds share one total.
    pub fn step_page(&mut self, step: PageStep) -> Result<u32, StepRefused> {
        if self.state.category().is_some() {
            return Err(StepRefused::Unpaginated);
        }
        let page = self.state.page;
        let target = match step {
            PageStep::Previous if page <= 1 => return Err(StepRefused::AtFirstPage),
            PageStep::Previous => page - 1,
            PageStep::Next => match self.known_total_pages {
                Some(total_pages) if page >= total_pages => {
                    return Err(StepRefused::AtLastPage)
                }
                _ => page.saturating_add(1),
            },
        };
        self.set_page(target);
        Ok(self.state.page)
    }

    /// True when the current page lies past the last page reported so far.
    pub fn is_past_end(&self) -> bool {
        self.state.category().is_none()
            && self
                .known_total_pages
                .is_some_and(|total_pages| self.state.page > total_pages.max(1))
    }

    pub fn clear(&mut self) {
        self.state = QueryState::default();
        self.sync_location();
        self.supersede();
    }

    pub fn resolve_query(&self) -> QuerySpec {
        QuerySpec::resolve(&self.state, self.page_size)
    }

    pub fn filter_status(&self) -> Option<FilterStatus> {
        self.state.category().map(|slug| FilterStatus {
            label: slug.display_name(),
            slug: slug.clone(),
        })
    }

    /// Issues the query for the current state and marks the view as loading.
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> QueryTicket {
        self.generation += 1;
        self.load = LoadState::Loading {
            generation: self.generation,
        };
        QueryTicket {
            generation: self.generation,
            spec: self.resolve_query(),
        }
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies the outcome of a fetch. Outcomes for stale tickets leave the
    /// view and the load state untouched.
    pub fn complete(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<ProductPage, CatalogError>,
    ) -> Completion {
        if !self.is_current(&ticket) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding response for superseded query"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(page) => {
                let pagination = Pagination::for_response(&ticket.spec, &page);
                if let Some(window) = pagination.window() {
                    self.known_total_pages = Some(window.total_pages);
                }
                self.load = LoadState::Ready;
                Completion::Rendered(ListingView {
                    products: page.products,
                    pagination,
                    filter_status: self.filter_status(),
                })
            }
            Err(err) => {
                warn!(error = %err, spec = ?ticket.spec, "listing fetch failed");
                self.load = LoadState::Failed;
                Completion::Failed(err)
            }
        }
    }

    fn sync_location(&mut self) {
        self.location.set_category(self.state.category());
    }

    fn supersede(&mut self) {
        self.generation += 1;
        if self.is_loading() {
            self.load = LoadState::Idle;
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
