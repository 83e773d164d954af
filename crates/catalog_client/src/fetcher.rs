use std::sync::Arc;

use shared::{
    catalog::{first_of, Category, CategoryExtension, Product, ProductExtension},
    domain::{CategoryUid, EntityId, ProductSku},
};
use tracing::debug;

use crate::{EntityStore, FetchError};

/// Entity plus its optional CMS extension, as returned by one detail query.
///
/// `entity == None` means the identifier matched nothing. The extension is
/// dropped in that case so callers never see an orphaned decoration.
#[derive(Debug, Clone)]
pub struct Fetched<E, X> {
    pub entity: Option<E>,
    pub extension: Option<X>,
}

impl<E, X> Fetched<E, X> {
    fn from_lists(entity: Option<E>, extension: Option<X>) -> Self {
        match entity {
            Some(entity) => Self {
                entity: Some(entity),
                extension,
            },
            None => Self {
                entity: None,
                extension: None,
            },
        }
    }

    pub fn is_absent(&self) -> bool {
        self.entity.is_none()
    }
}

#[derive(Debug, Clone)]
pub enum Entity {
    Category(Category),
    Product(Product),
}

#[derive(Debug, Clone)]
pub enum PageExtension {
    Category(CategoryExtension),
    Product(ProductExtension),
}

/// Second stage of page resolution: identifier to entity detail.
#[derive(Clone)]
pub struct EntityFetcher {
    store: Arc<dyn EntityStore>,
}

impl EntityFetcher {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn fetch_category(
        &self,
        uid: &CategoryUid,
    ) -> Result<Fetched<Category, CategoryExtension>, FetchError> {
        let detail = self.store.category_by_uid(uid).await?;
        let fetched =
            Fetched::from_lists(first_of(detail.categories), first_of(detail.extensions));
        debug!(
            %uid,
            found = !fetched.is_absent(),
            has_extension = fetched.extension.is_some(),
            "fetched category"
        );
        Ok(fetched)
    }

    pub async fn fetch_product(
        &self,
        sku: &ProductSku,
    ) -> Result<Fetched<Product, ProductExtension>, FetchError> {
        let detail = self.store.product_by_sku(sku).await?;
        let fetched =
            Fetched::from_lists(first_of(detail.products), first_of(detail.extensions));
        debug!(
            %sku,
            found = !fetched.is_absent(),
            has_extension = fetched.extension.is_some(),
            "fetched product"
        );
        Ok(fetched)
    }

    /// Kind-agnostic fetch for callers holding a resolved [`EntityId`].
    pub async fn fetch(
        &self,
        id: &EntityId,
    ) -> Result<(Option<Entity>, Option<PageExtension>), FetchError> {
        Ok(match id {
            EntityId::Category(uid) => {
                let fetched = self.fetch_category(uid).await?;
                (
                    fetched.entity.map(Entity::Category),
                    fetched.extension.map(PageExtension::Category),
                )
            }
            EntityId::Product(sku) => {
                let fetched = self.fetch_product(sku).await?;
                (
                    fetched.entity.map(Entity::Product),
                    fetched.extension.map(PageExtension::Product),
                )
            }
        })
    }
}
