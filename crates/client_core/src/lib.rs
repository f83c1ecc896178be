use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{CategorySlug, ProductId, SortKey, SortOrder},
    error::{CatalogError, SourceErrorBody},
    protocol::{Category, Product, ProductPage},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod controller;
pub mod listing;
pub mod location;
pub mod pagination;
pub mod query;

pub use controller::{
    Completion, FilterStatus, ListingController, ListingView, LoadState, PageStep, QueryTicket,
    StepRefused,
};
pub use listing::{FetchReport, ListingSession};
pub use location::{product_id_from_location, DetailLocationError, ListingLocation};
pub use pagination::{derive_window, PageEntry, PageLink, PageWindow, Pagination};
pub use query::{
    Filter, QuerySpec, QueryState, SortSelection, FEATURED_OFFSET, FEATURED_PAGE_SIZE,
    PRODUCTS_PER_PAGE,
};

pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";

/// Read-only catalog backend.
///
/// Every failure is terminal for the call: no retry, no partial results.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
    async fn list_page(&self, page_size: u32, offset: u32) -> Result<ProductPage, CatalogError>;
    async fn list_sorted(
        &self,
        key: SortKey,
        order: SortOrder,
        page_size: u32,
        offset: u32,
    ) -> Result<ProductPage, CatalogError>;
    async fn list_by_category(&self, slug: &CategorySlug) -> Result<ProductPage, CatalogError>;
    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    async fn run_query(&self, spec: &QuerySpec) -> Result<ProductPage, CatalogError> {
        match spec {
            QuerySpec::ByCategory { slug } => self.list_by_category(slug).await,
            QuerySpec::BySort {
                key,
                order,
                page_size,
                offset,
            } => self.list_sorted(*key, *order, *page_size, *offset).await,
            QuerySpec::ByPage { page_size, offset } => self.list_page(*page_size, *offset).await,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("base url '{0}' cannot carry a path")]
    CannotBeABase(String),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListProductsQuery {
    limit: u32,
    skip: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'static str>,
}

/// HTTP client for a dummyjson-compatible product API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: Url) -> Result<Self, ClientBuildError> {
        Self::with_http(base_url, Client::new())
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, ClientBuildError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_http(base_url, http)
    }

    fn with_http(base_url: Url, http: Client) -> Result<Self, ClientBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::CannotBeABase(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `with_http` rejects cannot-be-a-base urls.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<T, CatalogError> {
        debug!(%url, "requesting product source");
        let response = request.send().await.map_err(|err| {
            warn!(%url, error = %err, "product source request failed");
            CatalogError::fetch_failure(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<SourceErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            warn!(%url, %status, %detail, "product source returned non-success status");
            return Err(if status == StatusCode::NOT_FOUND {
                CatalogError::not_found(detail)
            } else {
                CatalogError::fetch_failure(format!("{status}: {detail}"))
            });
        }

        response.json::<T>().await.map_err(|err| {
            warn!(%url, error = %err, "product source returned a malformed body");
            CatalogError::fetch_failure(format!("malformed response from {url}: {err}"))
        })
    }

    async fn list_products(&self, query: ListProductsQuery) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(&["products"]);
        let request = self.http.get(url.clone()).query(&query);
        self.get_json(&url, request).await
    }
}

#[async_trait]
impl ProductSource for CatalogClient {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint(&["products", "categories"]);
        self.get_json(&url, self.http.get(url.clone())).await
    }

    async fn list_page(&self, page_size: u32, offset: u32) -> Result<ProductPage, CatalogError> {
        self.list_products(ListProductsQuery {
            limit: page_size,
            skip: offset,
            sort_by: None,
            order: None,
        })
        .await
    }

    async fn list_sorted(
        &self,
        key: SortKey,
        order: SortOrder,
        page_size: u32,
        offset: u32,
    ) -> Result<ProductPage, CatalogError> {
        self.list_products(ListProductsQuery {
            limit: page_size,
            skip: offset,
            sort_by: Some(key.as_str()),
            order: Some(order.as_str()),
        })
        .await
    }

    async fn list_by_category(&self, slug: &CategorySlug) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(&["products", "category", slug.as_str()]);
        self.get_json(&url, self.http.get(url.clone())).await
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let id = id.to_string();
        let url = self.endpoint(&["products", id.as_str()]);
        self.get_json(&url, self.http.get(url.clone())).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
