use std::sync::Arc;

use catalog_client::{EntityFetcher, EntityStore, FetchError, RouteResolver};
use shared::domain::{PageLink, RoutablePath, RouteRecord};
use tracing::info;

pub mod model;

use model::{page_link, CategoryPage, HomePage, ProductPage};

#[derive(Clone)]
pub struct PageContext {
    pub store: Arc<dyn EntityStore>,
}

impl PageContext {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }
}

/// Terminal state of one page request.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Ready { pages: Vec<PageLink>, model: T },
    Absent { pages: Vec<PageLink> },
}

impl<T> PageOutcome<T> {
    pub fn pages(&self) -> &[PageLink] {
        match self {
            Self::Ready { pages, .. } | Self::Absent { pages } => pages,
        }
    }

    pub fn model(&self) -> Option<&T> {
        match self {
            Self::Ready { model, .. } => Some(model),
            Self::Absent { .. } => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }
}

/// Site-wide page list for navigation, fetched for every page.
pub async fn load_navigation(ctx: &PageContext) -> Result<Vec<PageLink>, FetchError> {
    let listing = ctx.store.pages().await?;
    Ok(listing
        .page_list
        .map(|list| list.into_items())
        .unwrap_or_default()
        .into_iter()
        .filter_map(page_link)
        .collect())
}

pub async fn home_page(ctx: &PageContext) -> Result<PageOutcome<HomePage>, FetchError> {
    let pages = load_navigation(ctx).await?;
    Ok(PageOutcome::Ready {
        pages,
        model: HomePage::default(),
    })
}

pub async fn category_page(
    ctx: &PageContext,
    path: &RoutablePath,
) -> Result<PageOutcome<CategoryPage>, FetchError> {
    let pages = load_navigation(ctx).await?;

    let RouteRecord::Category(uid) = RouteResolver::categories(ctx.store.clone())
        .resolve(path)
        .await?
    else {
        info!(url = %path.lookup_key(), "no category route");
        return Ok(PageOutcome::Absent { pages });
    };

    let fetched = EntityFetcher::new(ctx.store.clone())
        .fetch_category(&uid)
        .await?;
    let Some(category) = fetched.entity else {
        info!(%uid, "category route points at a missing category");
        return Ok(PageOutcome::Absent { pages });
    };

    Ok(PageOutcome::Ready {
        pages,
        model: CategoryPage::assemble(category, fetched.extension),
    })
}

pub async fn product_page(
    ctx: &PageContext,
    url_key: &str,
) -> Result<PageOutcome<ProductPage>, FetchError> {
    let pages = load_navigation(ctx).await?;
    let path = RoutablePath::new([url_key]);

    let RouteRecord::Product(sku) = RouteResolver::products(ctx.store.clone())
        .resolve(&path)
        .await?
    else {
        info!(url = %path.lookup_key(), "no product route");
        return Ok(PageOutcome::Absent { pages });
    };

    let fetched = EntityFetcher::new(ctx.store.clone())
        .fetch_product(&sku)
        .await?;
    let Some(product) = fetched.entity else {
        info!(%sku, "product route points at a missing product");
        return Ok(PageOutcome::Absent { pages });
    };

    Ok(PageOutcome::Ready {
        pages,
        model: ProductPage::assemble(product, fetched.extension),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
