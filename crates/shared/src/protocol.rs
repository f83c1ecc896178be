use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CategorySlug, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: CategorySlug,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    pub date: DateTime<Utc>,
    pub reviewer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    pub fn discounted_price(&self) -> f64 {
        self.price * (1.0 - self.discount_percentage / 100.0)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One response of the product listing endpoints.
///
/// The category endpoint is consumed as unpaginated, so the metadata is
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_source_product_with_reviews() {
        let raw = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "thumbnail": "https://cdn.example/1/thumbnail.png",
            "images": ["https://cdn.example/1/1.png"],
            "availabilityStatus": "Low Stock",
            "reviews": [{
                "rating": 2,
                "comment": "Very unhappy with my purchase!",
                "date": "2024-05-23T08:56:21.618Z",
                "reviewerName": "John Doe",
                "reviewerEmail": "john.doe@x.dummyjson.com"
            }]
        }"#;

        let product: Product = serde_json::from_str(raw).expect("product");
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(product.availability_status.as_deref(), Some("Low Stock"));
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews[0].reviewer_name, "John Doe");
        assert!((product.discounted_price() - 9.273_717).abs() < 1e-6);
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{"id": 7, "title": "Bare", "price": 10}"#;
        let product: Product = serde_json::from_str(raw).expect("product");
        assert!(product.brand.is_none());
        assert!(product.reviews.is_empty());
        assert!(!product.in_stock());
        assert_eq!(product.discounted_price(), 10.0);
    }

    #[test]
    fn category_page_has_no_pagination_metadata() {
        let page: ProductPage = serde_json::from_str(r#"{"products": []}"#).expect("page");
        assert!(page.total.is_none());
        assert!(page.skip.is_none());
        assert!(page.limit.is_none());
    }
}
