//! Interactive browsing: one owner of the listing state, user commands from
//! stdin, fetch results from spawned tasks.

use std::str::FromStr;

use chrono::Local;
use client_core::{
    query::SortOptionError, Completion, FetchReport, ListingSession, PageStep, ProductSource,
    SortSelection,
};
use shared::domain::{CategorySlug, ProductId};
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::warn;

use crate::render::{self, ErrorView};

pub const HELP: &str = "\
commands:
  category <slug>   filter by category
  category          remove the category filter
  sort <option>     default, price-asc, price-desc, rating-asc, rating-desc
  page <n>          jump to page n
  next, prev        move one page
  clear             show all products
  show <id>         product details
  help              this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Category(Option<CategorySlug>),
    Sort(SortSelection),
    Page(u32),
    Next,
    Prev,
    Clear,
    Show(ProductId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'; type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs a {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("'{0}' is not a page number")]
    BadPage(String),
    #[error("'{0}' is not a product id")]
    BadId(String),
    #[error(transparent)]
    Sort(#[from] SortOptionError),
}

impl FromStr for BrowseCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let arg = words.next();

        match (verb.as_str(), arg) {
            ("category", slug) => Ok(Self::Category(slug.and_then(CategorySlug::new))),
            ("sort", option) => Ok(Self::Sort(option.unwrap_or("default").parse()?)),
            ("page", Some(n)) => n
                .parse()
                .map(Self::Page)
                .map_err(|_| CommandError::BadPage(n.to_string())),
            ("page", None) => Err(CommandError::MissingArgument("page", "page number")),
            ("next", _) => Ok(Self::Next),
            ("prev" | "previous", _) => Ok(Self::Prev),
            ("clear", _) => Ok(Self::Clear),
            ("show", Some(id)) => id
                .parse()
                .map(|id| Self::Show(ProductId(id)))
                .map_err(|_| CommandError::BadId(id.to_string())),
            ("show", None) => Err(CommandError::MissingArgument("show", "product id")),
            ("help" | "?", _) => Ok(Self::Help),
            ("quit" | "exit" | "q", _) => Ok(Self::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Quit,
    Text(String),
    /// A listing fetch is in flight; its result arrives as a [`FetchReport`].
    Fetching { location: String },
}

pub struct Browser<S: ProductSource + 'static> {
    session: ListingSession<S>,
    reports: mpsc::Sender<FetchReport>,
}

impl<S: ProductSource + 'static> Browser<S> {
    pub fn new(session: ListingSession<S>, reports: mpsc::Sender<FetchReport>) -> Self {
        Self { session, reports }
    }

    pub async fn open(&mut self) -> String {
        let completion = self.session.open().await;
        let mut blocks = Vec::new();
        if !self.session.categories().is_empty() {
            blocks.push(render::category_list(self.session.categories()));
        }
        blocks.push(self.show_completion(completion).unwrap_or_default());
        blocks.join("\n\n")
    }

    pub async fn apply(&mut self, command: BrowseCommand) -> Reply {
        let controller = self.session.controller_mut();
        match command {
            BrowseCommand::Category(slug) => controller.set_category(slug),
            BrowseCommand::Sort(selection) => controller.set_sort(selection.key, selection.order),
            BrowseCommand::Page(page) => controller.set_page(page),
            BrowseCommand::Next | BrowseCommand::Prev => {
                let step = if command == BrowseCommand::Next {
                    PageStep::Next
                } else {
                    PageStep::Previous
                };
                if let Err(refused) = controller.step_page(step) {
                    return Reply::Text(refused.to_string());
                }
            }
            BrowseCommand::Clear => controller.clear(),
            BrowseCommand::Show(id) => return Reply::Text(self.product_detail(id).await),
            BrowseCommand::Help => return Reply::Text(HELP.to_string()),
            BrowseCommand::Quit => return Reply::Quit,
        }

        self.session.spawn_fetch(self.reports.clone());
        Reply::Fetching {
            location: self.session.controller().location().as_str().to_string(),
        }
    }

    /// Text for a finished fetch, or `None` when it was superseded.
    pub fn accept(&mut self, report: FetchReport) -> Option<String> {
        let completion = self.session.accept(report);
        self.show_completion(completion)
    }

    fn show_completion(&self, completion: Completion) -> Option<String> {
        match completion {
            Completion::Rendered(view) => Some(render::listing(&view)),
            Completion::Failed(_) => Some(ErrorView::Listing.user_message().to_string()),
            Completion::Stale => None,
        }
    }

    async fn product_detail(&self, id: ProductId) -> String {
        match self.session.source().fetch_product(id).await {
            Ok(product) => render::product_detail(&product, &Local),
            Err(err) => {
                warn!(%id, error = %err, "failed to load product details");
                ErrorView::Detail.user_message().to_string()
            }
        }
    }
}

pub async fn run<S: ProductSource + 'static>(session: ListingSession<S>) -> anyhow::Result<()> {
    let (reports, mut incoming) = mpsc::channel(8);
    let mut browser = Browser::new(session, reports);

    println!("{}", browser.open().await);
    println!("\ntype `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<BrowseCommand>() {
                    Ok(command) => match browser.apply(command).await {
                        Reply::Quit => break,
                        Reply::Text(text) => println!("{text}"),
                        Reply::Fetching { location } => println!("Loading... {location}"),
                    },
                    Err(CommandError::Empty) => {}
                    Err(err) => println!("{err}"),
                }
            }
            Some(report) = incoming.recv() => {
                if let Some(text) = browser.accept(report) {
                    println!("{text}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
