use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL-safe category identifier, e.g. `womens-dresses`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Returns `None` for blank input, which callers treat as "no filter".
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human label derived from the slug: `home-decoration` -> `Home Decoration`.
    pub fn display_name(&self) -> String {
        self.0
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    Rating,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Rating => "rating",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slug_means_no_filter() {
        assert!(CategorySlug::new("").is_none());
        assert!(CategorySlug::new("   ").is_none());
        assert_eq!(
            CategorySlug::new(" beauty ").map(|slug| slug.to_string()),
            Some("beauty".to_string())
        );
    }

    #[test]
    fn display_name_title_cases_each_word() {
        let slug = CategorySlug::new("home-decoration").expect("slug");
        assert_eq!(slug.display_name(), "Home Decoration");
        let slug = CategorySlug::new("mens-shirts").expect("slug");
        assert_eq!(slug.display_name(), "Mens Shirts");
    }

    #[test]
    fn sort_enums_use_wire_names() {
        assert_eq!(SortKey::Rating.as_str(), "rating");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert_eq!(
            serde_json::to_string(&SortKey::Price).expect("json"),
            "\"price\""
        );
    }
}
