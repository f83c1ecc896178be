use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use client_core::{
    product_id_from_location, CatalogClient, Completion, DetailLocationError, ListingController,
    ListingLocation, ListingSession, ProductSource, QuerySpec, SortSelection,
};
use shared::domain::{CategorySlug, ProductId};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

mod browse;
mod config;
mod icons;
mod render;

use render::ErrorView;

/// Where the listing view lives when no `--location` is given.
const DEFAULT_LISTING_LOCATION: &str = "catalog://products";

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse a product catalog from the terminal")]
struct Cli {
    /// Overrides the configured product API.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List product categories.
    Categories,
    /// Show the featured products strip.
    Featured,
    /// Show one listing page.
    List {
        /// Listing location; its `category` parameter seeds the filter.
        #[arg(long)]
        location: Option<Url>,
        #[arg(long, conflicts_with = "sort")]
        category: Option<String>,
        /// default, price-asc, price-desc, rating-asc or rating-desc.
        #[arg(long)]
        sort: Option<SortSelection>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one product with its reviews.
    Product {
        #[arg(long, conflicts_with = "location")]
        id: Option<u32>,
        /// Detail location carrying an `id` parameter.
        #[arg(long)]
        location: Option<Url>,
    },
    /// Interactive listing.
    Browse {
        #[arg(long)]
        location: Option<Url>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(url) = &cli.api_base_url {
        settings.api_base_url = config::normalize_base_url(url);
    }
    info!(api_base_url = %settings.api_base_url, "starting catalog");

    let base_url = Url::parse(&format!("{}/", settings.api_base_url))
        .with_context(|| format!("invalid api base url '{}'", settings.api_base_url))?;
    let client = Arc::new(
        CatalogClient::with_timeout(base_url, Duration::from_secs(settings.request_timeout_secs))
            .context("failed to build catalog client")?,
    );

    let ok = match cli.command {
        Command::Categories => show_categories(client.as_ref()).await,
        Command::Featured => show_featured(client.as_ref(), settings.featured_offset).await,
        Command::List {
            location,
            category,
            sort,
            page,
        } => {
            let mut session = ListingSession::new(client, controller_at(location)?);
            let controller = session.controller_mut();
            if let Some(slug) = category {
                controller.set_category(CategorySlug::new(slug));
            }
            if let Some(selection) = sort {
                controller.set_sort(selection.key, selection.order);
            }
            if let Some(page) = page {
                controller.set_page(page);
            }
            show_listing(session.refresh_within_bounds().await)
        }
        Command::Product { id, location } => {
            show_product(client.as_ref(), id.map(ProductId), location).await
        }
        Command::Browse { location } => {
            let session = ListingSession::new(client, controller_at(location)?);
            browse::run(session).await?;
            true
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn controller_at(location: Option<Url>) -> Result<ListingController> {
    let location = match location {
        Some(url) => ListingLocation::new(url),
        None => ListingLocation::parse(DEFAULT_LISTING_LOCATION)?,
    };
    Ok(ListingController::new(location))
}

async fn show_categories(source: &dyn ProductSource) -> bool {
    match source.list_categories().await {
        Ok(categories) => {
            println!("{}", render::category_list(&categories));
            true
        }
        Err(err) => {
            error!(error = %err, "failed to load categories");
            println!("{}", ErrorView::Categories.user_message());
            false
        }
    }
}

async fn show_featured(source: &dyn ProductSource, offset: u32) -> bool {
    match source.run_query(&QuerySpec::featured(offset)).await {
        Ok(page) => {
            println!("{}", render::featured_strip(&page.products));
            true
        }
        Err(err) => {
            error!(error = %err, "failed to load featured products");
            println!("{}", ErrorView::Featured.user_message());
            false
        }
    }
}

fn show_listing(completion: Completion) -> bool {
    match completion {
        Completion::Rendered(view) => {
            println!("{}", render::listing(&view));
            true
        }
        Completion::Failed(_) | Completion::Stale => {
            println!("{}", ErrorView::Listing.user_message());
            false
        }
    }
}

async fn show_product(
    source: &dyn ProductSource,
    id: Option<ProductId>,
    location: Option<Url>,
) -> bool {
    let id = match (id, location) {
        (Some(id), _) => Ok(id),
        (None, Some(url)) => product_id_from_location(&url),
        (None, None) => Err(DetailLocationError::MissingId),
    };

    let result = match id {
        Ok(id) => source.fetch_product(id).await,
        Err(DetailLocationError::MissingId) => {
            println!("{}", DetailLocationError::MissingId);
            return false;
        }
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(product) => {
            println!("{}", render::product_detail(&product, &Local));
            true
        }
        Err(err) => {
            error!(error = %err, "failed to load product details");
            println!("{}", ErrorView::Detail.user_message());
            false
        }
    }
}
