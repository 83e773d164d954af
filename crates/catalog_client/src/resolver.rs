use std::sync::Arc;

use shared::{
    catalog::RouteTarget,
    domain::{CategoryUid, ProductSku, RoutablePath, RouteRecord},
};
use tracing::debug;

use crate::{EntityStore, FetchError};

/// Which route table a resolver consults and which identifier it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Category,
    Product,
}

/// First stage of page resolution: URL path to entity identifier.
#[derive(Clone)]
pub struct RouteResolver {
    store: Arc<dyn EntityStore>,
    kind: RouteKind,
}

impl RouteResolver {
    pub fn new(store: Arc<dyn EntityStore>, kind: RouteKind) -> Self {
        Self { store, kind }
    }

    pub fn categories(store: Arc<dyn EntityStore>) -> Self {
        Self::new(store, RouteKind::Category)
    }

    pub fn products(store: Arc<dyn EntityStore>) -> Self {
        Self::new(store, RouteKind::Product)
    }

    /// Looks `path` up in the route table.
    ///
    /// A missing route, or one carrying no identifier, is `NotFound`.
    /// Transport and GraphQL failures are returned as errors.
    pub async fn resolve(&self, path: &RoutablePath) -> Result<RouteRecord, FetchError> {
        let url = path.lookup_key();
        let lookup = match self.kind {
            RouteKind::Category => self.store.category_by_route(&url).await?,
            RouteKind::Product => self.store.product_by_route(&url).await?,
        };

        let record = lookup
            .route
            .map(|target| record_for(self.kind, target))
            .unwrap_or(RouteRecord::NotFound);
        debug!(%url, kind = ?self.kind, ?record, "resolved route");
        Ok(record)
    }
}

fn record_for(kind: RouteKind, target: RouteTarget) -> RouteRecord {
    let uid = non_empty(target.uid).map(|uid| RouteRecord::Category(CategoryUid(uid)));
    let sku = non_empty(target.sku).map(|sku| RouteRecord::Product(ProductSku(sku)));
    let preferred = match kind {
        RouteKind::Category => uid.or(sku),
        RouteKind::Product => sku.or(uid),
    };
    preferred.unwrap_or(RouteRecord::NotFound)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
