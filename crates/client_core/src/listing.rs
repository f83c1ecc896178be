//! Listing session: ties the query controller to a [`ProductSource`].

use std::sync::Arc;

use shared::{
    error::CatalogError,
    protocol::{Category, ProductPage},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};

use crate::{
    controller::{Completion, ListingController, QueryTicket},
    ProductSource,
};

/// Outcome of a spawned fetch, delivered back to the session owner.
#[derive(Debug)]
pub struct FetchReport {
    pub ticket: QueryTicket,
    pub outcome: Result<ProductPage, CatalogError>,
}

pub struct ListingSession<S: ProductSource + ?Sized> {
    source: Arc<S>,
    controller: ListingController,
    categories: Vec<Category>,
}

impl<S> ListingSession<S>
where
    S: ProductSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, controller: ListingController) -> Self {
        Self {
            source,
            controller,
            categories: Vec::new(),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn controller(&self) -> &ListingController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ListingController {
        &mut self.controller
    }

    /// Filter options; empty until [`ListingSession::open`] has loaded them.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Loads the filter options and the first listing concurrently. A failure
    /// to load categories leaves the filter empty but still renders products.
    pub async fn open(&mut self) -> Completion {
        let ticket = self.controller.begin_fetch();
        info!(spec = ?ticket.spec(), "opening listing");
        let source = Arc::clone(&self.source);
        let (categories, outcome) =
            futures::join!(source.list_categories(), source.run_query(ticket.spec()));

        match categories {
            Ok(categories) => self.categories = categories,
            Err(err) => warn!(error = %err, "failed to populate category filter"),
        }
        self.controller.complete(ticket, outcome)
    }

    /// Fetches the current query and waits for it.
    pub async fn refresh(&mut self) -> Completion {
        let ticket = self.controller.begin_fetch();
        info!(spec = ?ticket.spec(), "fetching listing");
        let outcome = self.source.run_query(ticket.spec()).await;
        self.controller.complete(ticket, outcome)
    }

    /// Like [`ListingSession::refresh`], but when the response shows the
    /// requested page lies past the end, re-issues the query for the last page.
    pub async fn refresh_within_bounds(&mut self) -> Completion {
        let completion = self.refresh().await;
        if !self.controller.is_past_end() {
            return completion;
        }
        let requested = self.controller.state().page();
        self.controller.set_page(requested);
        info!(
            requested,
            page = self.controller.state().page(),
            "requested page is past the end; reloading the last page"
        );
        self.refresh().await
    }

    /// Issues the current query on a background task. The report arrives on
    /// `reports` and must be fed to [`ListingSession::accept`]; transitions
    /// made in the meantime turn it stale.
    pub fn spawn_fetch(&mut self, reports: mpsc::Sender<FetchReport>) -> JoinHandle<()> {
        let ticket = self.controller.begin_fetch();
        info!(
            generation = ticket.generation(),
            spec = ?ticket.spec(),
            "fetching listing"
        );
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let outcome = source.run_query(ticket.spec()).await;
            if reports.send(FetchReport { ticket, outcome }).await.is_err() {
                warn!("listing report receiver dropped");
            }
        })
    }

    pub fn accept(&mut self, report: FetchReport) -> Completion {
        self.controller.complete(report.ticket, report.outcome)
    }
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
