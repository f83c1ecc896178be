use shared::domain::CategorySlug;

/// Icon shown next to a category in the filter list and the categories view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Gem,
    Stars,
    Lamp,
    Phone,
    Laptop,
    Dress,
    Shirt,
    Basket,
    House,
    Sunglasses,
    Car,
    Motorcycle,
    Lightbulb,
    Droplet,
    Person,
    HeeledShoe,
    Shoe,
    Watch,
    Handbag,
    Diamond,
    Joystick,
    /// Any slug the catalog did not know about when this table was written.
    Tag,
}

impl CategoryIcon {
    pub fn from_slug(slug: &CategorySlug) -> Self {
        match slug.as_str() {
            "beauty" => Self::Gem,
            "fragrances" => Self::Stars,
            "furniture" => Self::Lamp,
            "smartphones" => Self::Phone,
            "laptops" => Self::Laptop,
            "womens-dresses" => Self::Dress,
            "mens-shirts" => Self::Shirt,
            "groceries" => Self::Basket,
            "home-decoration" => Self::House,
            "sunglasses" => Self::Sunglasses,
            "automotive" => Self::Car,
            "motorcycle" => Self::Motorcycle,
            "lighting" => Self::Lightbulb,
            "skincare" => Self::Droplet,
            "tops" => Self::Person,
            "womens-shoes" => Self::HeeledShoe,
            "mens-shoes" => Self::Shoe,
            "mens-watches" | "womens-watches" => Self::Watch,
            "womens-bags" => Self::Handbag,
            "womens-jewellery" => Self::Diamond,
            "sports-accessories" => Self::Joystick,
            _ => Self::Tag,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Gem => "💎",
            Self::Stars => "✨",
            Self::Lamp => "🪑",
            Self::Phone => "📱",
            Self::Laptop => "💻",
            Self::Dress => "👗",
            Self::Shirt => "👔",
            Self::Basket => "🧺",
            Self::House => "🏠",
            Self::Sunglasses => "🕶",
            Self::Car => "🚗",
            Self::Motorcycle => "🏍",
            Self::Lightbulb => "💡",
            Self::Droplet => "💧",
            Self::Person => "👚",
            Self::HeeledShoe => "👠",
            Self::Shoe => "👞",
            Self::Watch => "⌚",
            Self::Handbag => "👜",
            Self::Diamond => "💍",
            Self::Joystick => "🕹",
            Self::Tag => "🏷",
        }
    }
}

#[cfg(test)]
#[path = "tests/icons_tests.rs"]
mod tests;
