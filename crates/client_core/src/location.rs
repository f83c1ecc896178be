//! The visible location of the listing and detail views.
//!
//! The listing mirrors its category filter into the `category` query
//! parameter so a location can be shared or revisited. It is read back only
//! when a listing is opened.

use shared::{
    domain::{CategorySlug, ProductId},
    error::CatalogError,
};
use thiserror::Error;
use url::Url;

pub const CATEGORY_PARAM: &str = "category";
pub const PRODUCT_ID_PARAM: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLocation {
    url: Url,
}

impl ListingLocation {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    pub fn category(&self) -> Option<CategorySlug> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == CATEGORY_PARAM)
            .and_then(|(_, value)| CategorySlug::new(value))
    }

    /// Sets or removes the `category` parameter, keeping every other parameter
    /// in its original order.
    pub fn set_category(&mut self, slug: Option<&CategorySlug>) {
        let retained: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != CATEGORY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if retained.is_empty() && slug.is_none() {
            self.url.set_query(None);
            return;
        }

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if let Some(slug) = slug {
            pairs.append_pair(CATEGORY_PARAM, slug.as_str());
        }
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailLocationError {
    #[error("No product ID provided.")]
    MissingId,
    #[error("invalid product id '{0}'")]
    InvalidId(String),
}

impl From<DetailLocationError> for CatalogError {
    fn from(value: DetailLocationError) -> Self {
        CatalogError::not_found(value.to_string())
    }
}

/// Product id of a detail location. A non-numeric id can never exist
/// remotely, so it is rejected here rather than sent to the source.
pub fn product_id_from_location(url: &Url) -> Result<ProductId, DetailLocationError> {
    let raw = url
        .query_pairs()
        .find(|(key, _)| key == PRODUCT_ID_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(DetailLocationError::MissingId)?;

    raw.parse::<u32>()
        .map(ProductId)
        .map_err(|_| DetailLocationError::InvalidId(raw))
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
