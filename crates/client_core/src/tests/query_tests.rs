use super::*;

fn slug(raw: &str) -> CategorySlug {
    CategorySlug::new(raw).expect("slug")
}

#[test]
fn default_state_resolves_to_first_page() {
    let state = QueryState::default();
    assert_eq!(state.page(), 1);
    assert_eq!(
        QuerySpec::resolve(&state, PRODUCTS_PER_PAGE),
        QuerySpec::ByPage {
            page_size: 9,
            offset: 0
        }
    );
}

#[test]
fn offset_follows_page_number() {
    let state = QueryState {
        page: 4,
        filter: Filter::None,
    };
    assert_eq!(state.offset(PRODUCTS_PER_PAGE), 27);
}

#[test]
fn sort_filter_resolves_to_sorted_page() {
    let state = QueryState {
        page: 2,
        filter: Filter::Sort {
            key: SortKey::Price,
            order: SortOrder::Desc,
        },
    };
    assert_eq!(state.sort_key(), Some(SortKey::Price));
    assert!(state.category().is_none());
    assert_eq!(
        QuerySpec::resolve(&state, PRODUCTS_PER_PAGE),
        QuerySpec::BySort {
            key: SortKey::Price,
            order: SortOrder::Desc,
            page_size: 9,
            offset: 9
        }
    );
}

#[test]
fn category_filter_ignores_page() {
    let state = QueryState {
        page: 3,
        filter: Filter::Category(slug("beauty")),
    };
    let spec = QuerySpec::resolve(&state, PRODUCTS_PER_PAGE);
    assert_eq!(
        spec,
        QuerySpec::ByCategory {
            slug: slug("beauty")
        }
    );
    assert!(!spec.is_paginated());
    assert_eq!(spec.window(), None);
}

#[test]
fn sort_order_defaults_to_ascending_without_sort() {
    let state = QueryState {
        page: 1,
        filter: Filter::Category(slug("laptops")),
    };
    assert_eq!(state.sort_order(), SortOrder::Asc);
}

#[test]
fn featured_strip_is_four_items_at_offset() {
    let spec = QuerySpec::featured(FEATURED_OFFSET);
    assert_eq!(spec.window(), Some((4, 10)));
}

#[test]
fn parses_sort_options() {
    assert_eq!(
        "price-asc".parse::<SortSelection>().expect("sort"),
        SortSelection {
            key: Some(SortKey::Price),
            order: SortOrder::Asc
        }
    );
    assert_eq!(
        "Rating-Desc".parse::<SortSelection>().expect("sort"),
        SortSelection {
            key: Some(SortKey::Rating),
            order: SortOrder::Desc
        }
    );
    assert_eq!(
        "default".parse::<SortSelection>().expect("sort"),
        SortSelection::default()
    );
    assert!("name-asc".parse::<SortSelection>().is_err());
    assert!("price".parse::<SortSelection>().is_err());
    assert!("price-up".parse::<SortSelection>().is_err());
}
