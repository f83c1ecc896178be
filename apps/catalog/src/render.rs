//! Plain-text views of catalog data for the terminal.

use chrono::{DateTime, TimeZone, Utc};
use client_core::{FilterStatus, ListingView, PageEntry, PageLink, Pagination};
use shared::protocol::{Category, Product, Review};

use crate::icons::CategoryIcon;

pub const NO_PRODUCTS: &str = "No Products To Display";
pub const NO_REVIEWS: &str = "No reviews yet for this product.";
pub const EXCERPT_CHARS: usize = 70;

const STAR_FULL: char = '★';
const STAR_HALF: char = '⯪';
const STAR_EMPTY: char = '☆';

/// Which view a failure is shown in. Every failure of a view reads the same
/// regardless of its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorView {
    Listing,
    Featured,
    Categories,
    Detail,
}

impl ErrorView {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Listing | Self::Featured => "Failed to load products.",
            Self::Categories => "Failed to load categories.",
            Self::Detail => "Failed to load product details. Please try again later.",
        }
    }
}

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn rating_stars(rating: f64) -> String {
    (1..=5)
        .map(|i| {
            let i = f64::from(i);
            if rating >= i {
                STAR_FULL
            } else if rating >= i - 0.5 {
                STAR_HALF
            } else {
                STAR_EMPTY
            }
        })
        .collect()
}

pub fn excerpt(description: &str) -> String {
    let mut short: String = description.chars().take(EXCERPT_CHARS).collect();
    short.push_str("...");
    short
}

pub fn review_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

fn discount_badge(product: &Product) -> String {
    format!("{:.0}% OFF", product.discount_percentage)
}

pub fn product_card(product: &Product) -> String {
    [
        format!("#{} {}  [{}]", product.id, product.title, discount_badge(product)),
        format!("    {}", excerpt(&product.description)),
        format!(
            "    {} (was {})  {} {:.2}",
            format_price(product.discounted_price()),
            format_price(product.price),
            rating_stars(product.rating),
            product.rating
        ),
    ]
    .join("\n")
}

pub fn featured_strip(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_PRODUCTS.to_string();
    }
    products
        .iter()
        .map(|product| {
            format!(
                "#{} {} ({})  {}  {STAR_FULL} {:.1}",
                product.id,
                product.title,
                product.category,
                format_price(product.discounted_price()),
                product.rating
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn category_list(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|category| {
            format!(
                "{} {}  ({})",
                CategoryIcon::from_slug(&category.slug).glyph(),
                category.name,
                category.slug
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn filter_banner(status: &FilterStatus) -> String {
    format!("Filtering by: {}  (type `clear` to show all products)", status.label)
}

fn arrow(label: &str, link: PageLink) -> String {
    if link.enabled {
        label.to_string()
    } else {
        format!("({label})")
    }
}

pub fn pagination_line(pagination: &Pagination) -> Option<String> {
    let window = pagination.window()?;
    let mut parts = vec![arrow("« Prev", window.previous)];
    parts.extend(window.entries.iter().map(|entry| match entry {
        PageEntry::Page {
            number,
            active: true,
        } => format!("[{number}]"),
        PageEntry::Page { number, .. } => number.to_string(),
        PageEntry::Ellipsis => "…".to_string(),
    }));
    parts.push(arrow("Next »", window.next));
    Some(parts.join(" "))
}

pub fn listing(view: &ListingView) -> String {
    let mut blocks = Vec::new();
    if let Some(status) = &view.filter_status {
        blocks.push(filter_banner(status));
    }
    if view.products.is_empty() {
        blocks.push(NO_PRODUCTS.to_string());
    } else {
        blocks.extend(view.products.iter().map(product_card));
    }
    if let Some(line) = pagination_line(&view.pagination) {
        blocks.push(line);
    }
    blocks.join("\n\n")
}

fn review_block<Tz: TimeZone>(review: &Review, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "  {}  {}\n  {}\n  {}",
        review.reviewer_name,
        rating_stars(review.rating),
        review.comment,
        review_date(&review.date, tz)
    )
}

pub fn product_detail<Tz: TimeZone>(product: &Product, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = vec![
        format!("[{}]", product.category),
        product.title.clone(),
        format!(
            "{} ({:.2} from {} reviews)",
            rating_stars(product.rating),
            product.rating,
            product.reviews.len()
        ),
        String::new(),
        product.description.clone(),
        String::new(),
        format!(
            "{}  was {}  {}",
            format_price(product.discounted_price()),
            format_price(product.price),
            discount_badge(product)
        ),
    ];
    if let Some(brand) = &product.brand {
        lines.push(format!("Brand: {brand}"));
    }
    let availability = product.availability_status.as_deref().unwrap_or(if product.in_stock() {
        "In Stock"
    } else {
        "Out of Stock"
    });
    lines.push(format!(
        "Availability: {availability} ({} left in stock)",
        product.stock
    ));

    lines.push(String::new());
    lines.push("Images:".to_string());
    lines.extend(
        std::iter::once(&product.thumbnail)
            .chain(product.images.iter())
            .filter(|src| !src.is_empty())
            .map(|src| format!("  {src}")),
    );

    lines.push(String::new());
    lines.push("Customer Reviews".to_string());
    if product.reviews.is_empty() {
        lines.push(format!("  {NO_REVIEWS}"));
    } else {
        lines.extend(product.reviews.iter().map(|review| review_block(review, tz)));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
