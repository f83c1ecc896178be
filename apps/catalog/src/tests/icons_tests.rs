use super::CategoryIcon;
use shared::domain::CategorySlug;

fn icon(slug: &str) -> CategoryIcon {
    CategoryIcon::from_slug(&CategorySlug::new(slug).expect("slug"))
}

#[test]
fn known_slugs_map_to_their_icons() {
    assert_eq!(icon("beauty"), CategoryIcon::Gem);
    assert_eq!(icon("home-decoration"), CategoryIcon::House);
    assert_eq!(icon("sports-accessories"), CategoryIcon::Joystick);
}

#[test]
fn watch_categories_share_an_icon() {
    assert_eq!(icon("mens-watches"), icon("womens-watches"));
}

#[test]
fn unknown_slug_falls_back_to_tag() {
    assert_eq!(icon("vehicle"), CategoryIcon::Tag);
    assert_eq!(icon("Beauty"), CategoryIcon::Tag);
    assert_eq!(CategoryIcon::Tag.glyph(), "🏷");
}
