use super::*;
use async_trait::async_trait;
use shared::{
    domain::{CategorySlug, ProductId, SortKey, SortOrder},
    protocol::Product,
};
use tokio::sync::{Mutex, Notify};

use crate::{location::ListingLocation, pagination::Pagination, query::QuerySpec};

struct FakeSource {
    issued: Mutex<Vec<QuerySpec>>,
    fail_categories: bool,
    fail_products: bool,
    held_category: Option<CategorySlug>,
    release: Notify,
}

impl FakeSource {
    fn ok() -> Self {
        Self {
            issued: Mutex::new(Vec::new()),
            fail_categories: false,
            fail_products: false,
            held_category: None,
            release: Notify::new(),
        }
    }

    fn holding(slug: &str) -> Self {
        Self {
            held_category: CategorySlug::new(slug),
            ..Self::ok()
        }
    }

    fn page(first_id: u32, count: u32, total: Option<u32>) -> ProductPage {
        ProductPage {
            products: (first_id..first_id + count).map(product).collect(),
            total,
            skip: total.map(|_| first_id - 1),
            limit: total.map(|_| count),
        }
    }
}

fn product(id: u32) -> Product {
    Product {
        id: ProductId(id),
        title: format!("Product {id}"),
        description: String::new(),
        category: "beauty".to_string(),
        price: 1.0,
        discount_percentage: 0.0,
        rating: 3.0,
        stock: 1,
        brand: None,
        thumbnail: String::new(),
        images: Vec::new(),
        availability_status: None,
        reviews: Vec::new(),
    }
}

#[async_trait]
impl ProductSource for FakeSource {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if self.fail_categories {
            return Err(CatalogError::fetch_failure("categories unavailable"));
        }
        Ok(vec![Category {
            slug: CategorySlug::new("beauty").expect("slug"),
            name: "Beauty".to_string(),
            url: None,
        }])
    }

    async fn list_page(&self, page_size: u32, offset: u32) -> Result<ProductPage, CatalogError> {
        self.issued
            .lock()
            .await
            .push(QuerySpec::ByPage { page_size, offset });
        if self.fail_products {
            return Err(CatalogError::fetch_failure("connection reset"));
        }
        Ok(Self::page(offset + 1, page_size, Some(90)))
    }

    async fn list_sorted(
        &self,
        key: SortKey,
        order: SortOrder,
        page_size: u32,
        offset: u32,
    ) -> Result<ProductPage, CatalogError> {
        self.issued.lock().await.push(QuerySpec::BySort {
            key,
            order,
            page_size,
            offset,
        });
        Ok(Self::page(offset + 1, page_size, Some(90)))
    }

    async fn list_by_category(&self, slug: &CategorySlug) -> Result<ProductPage, CatalogError> {
        self.issued
            .lock()
            .await
            .push(QuerySpec::ByCategory { slug: slug.clone() });
        if self.held_category.as_ref() == Some(slug) {
            self.release.notified().await;
        }
        Ok(Self::page(1, 3, None))
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        Ok(product(id.0))
    }
}

fn session(source: FakeSource, location: &str) -> ListingSession<FakeSource> {
    let location = ListingLocation::parse(location).expect("location");
    ListingSession::new(Arc::new(source), ListingController::new(location))
}

#[tokio::test]
async fn open_loads_categories_and_first_page() {
    let mut session = session(FakeSource::ok(), "https://shop.example/products.html");

    let Completion::Rendered(view) = session.open().await else {
        panic!("expected rendered view");
    };

    assert_eq!(view.products.len(), 9);
    assert_eq!(view.pagination.window().map(|w| w.total_pages), Some(10));
    assert_eq!(session.categories().len(), 1);
    assert!(!session.controller().is_loading());
}

#[tokio::test]
async fn open_renders_products_when_categories_fail() {
    let source = FakeSource {
        fail_categories: true,
        ..FakeSource::ok()
    };
    let mut session = session(source, "https://shop.example/products.html");

    let completion = session.open().await;

    assert!(matches!(completion, Completion::Rendered(_)));
    assert!(session.categories().is_empty());
}

#[tokio::test]
async fn open_with_seeded_category_hides_pagination() {
    let mut session = session(
        FakeSource::ok(),
        "https://shop.example/products.html?category=beauty",
    );

    let Completion::Rendered(view) = session.open().await else {
        panic!("expected rendered view");
    };

    assert_eq!(view.pagination, Pagination::Hidden);
    assert_eq!(
        view.filter_status.map(|status| status.label),
        Some("Beauty".to_string())
    );
}

#[tokio::test]
async fn refresh_issues_sorted_query_after_transition() {
    let source = Arc::new(FakeSource::ok());
    let location = ListingLocation::parse("https://shop.example/products.html").expect("location");
    let mut session = ListingSession::new(Arc::clone(&source), ListingController::new(location));

    session
        .controller_mut()
        .set_sort(Some(SortKey::Price), SortOrder::Desc);
    session.controller_mut().set_page(2);
    let completion = session.refresh().await;

    assert!(matches!(completion, Completion::Rendered(_)));
    assert_eq!(
        source.issued.lock().await.as_slice(),
        [QuerySpec::BySort {
            key: SortKey::Price,
            order: SortOrder::Desc,
            page_size: 9,
            offset: 9,
        }]
    );
}

#[tokio::test]
async fn failed_refresh_leaves_state_intact() {
    let source = FakeSource {
        fail_products: true,
        ..FakeSource::ok()
    };
    let mut session = session(source, "https://shop.example/products.html");
    session.controller_mut().set_page(3);

    let completion = session.refresh().await;

    assert!(matches!(completion, Completion::Failed(_)));
    assert_eq!(session.controller().state().page(), 3);
    assert!(!session.controller().is_loading());
}

#[tokio::test]
async fn late_response_for_superseded_category_is_dropped() {
    let source = Arc::new(FakeSource::holding("beauty"));
    let location = ListingLocation::parse("https://shop.example/products.html").expect("location");
    let mut session = ListingSession::new(Arc::clone(&source), ListingController::new(location));
    let (tx, mut rx) = mpsc::channel(4);

    session
        .controller_mut()
        .set_category(CategorySlug::new("beauty"));
    let slow = session.spawn_fetch(tx.clone());
    session
        .controller_mut()
        .set_category(CategorySlug::new("laptops"));
    let fast = session.spawn_fetch(tx);

    fast.await.expect("fast fetch");
    let first = rx.recv().await.expect("first report");
    assert!(matches!(session.accept(first), Completion::Rendered(_)));

    source.release.notify_one();
    slow.await.expect("slow fetch");
    let second = rx.recv().await.expect("second report");
    assert_eq!(session.accept(second), Completion::Stale);

    assert_eq!(
        session.controller().state().category().map(|slug| slug.as_str()),
        Some("laptops")
    );
    assert!(!session.controller().is_loading());
}

#[tokio::test]
async fn out_of_range_page_reloads_the_last_page() {
    let source = Arc::new(FakeSource::ok());
    let location = ListingLocation::parse("https://shop.example/products.html").expect("location");
    let mut session = ListingSession::new(Arc::clone(&source), ListingController::new(location));

    session.controller_mut().set_page(1000);
    let Completion::Rendered(view) = session.refresh_within_bounds().await else {
        panic!("expected rendered view");
    };

    assert_eq!(view.pagination.window().map(|w| w.current_page), Some(10));
    assert_eq!(session.controller().state().page(), 10);
    assert_eq!(
        source.issued.lock().await.as_slice(),
        [
            QuerySpec::ByPage {
                page_size: 9,
                offset: 8991,
            },
            QuerySpec::ByPage {
                page_size: 9,
                offset: 81,
            },
        ]
    );
}

#[tokio::test]
async fn in_range_page_is_fetched_once() {
    let source = Arc::new(FakeSource::ok());
    let location = ListingLocation::parse("https://shop.example/products.html").expect("location");
    let mut session = ListingSession::new(Arc::clone(&source), ListingController::new(location));

    session.controller_mut().set_page(4);
    let completion = session.refresh_within_bounds().await;

    assert!(matches!(completion, Completion::Rendered(_)));
    assert_eq!(source.issued.lock().await.len(), 1);
}
