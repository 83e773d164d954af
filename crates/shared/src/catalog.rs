//! Response shapes of the catalog and CMS GraphQL queries.
//!
//! Every nested field is optional because the mesh omits or nulls fields
//! freely; consumers decode these once into fully defaulted view models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemList<T> {
    pub items: Option<Vec<T>>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self { items: None }
    }
}

impl<T> ItemList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items: Some(items) }
    }

    /// First item of the list. Multiple matches resolve to the first one.
    pub fn into_first(self) -> Option<T> {
        self.items.and_then(|items| items.into_iter().next())
    }

    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// First item of an optional list, the common case for nullable GraphQL lists.
pub fn first_of<T>(list: Option<ItemList<T>>) -> Option<T> {
    list.and_then(ItemList::into_first)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteLookup {
    pub route: Option<RouteTarget>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTarget {
    pub uid: Option<String>,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub categories: Option<ItemList<Category>>,
    #[serde(rename = "categoryPageExtensionList")]
    pub extensions: Option<ItemList<CategoryExtension>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDetail {
    pub products: Option<ItemList<Product>>,
    #[serde(rename = "productPageExtensionList")]
    pub extensions: Option<ItemList<ProductExtension>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageListing {
    #[serde(rename = "pageList")]
    pub page_list: Option<ItemList<PageEntry>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageEntry {
    pub title: Option<String>,
    #[serde(rename = "_path")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub uid: String,
    pub name: Option<String>,
    pub products: Option<ItemList<ProductSummary>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSummary {
    pub sku: String,
    pub name: Option<String>,
    pub url_key: Option<String>,
    pub small_image: Option<ImageRef>,
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: Option<String>,
    pub url_key: Option<String>,
    pub description: Option<RichText>,
    pub categories: Option<Vec<CategoryRef>>,
    pub media_gallery: Option<Vec<ImageRef>>,
    pub price_range: Option<PriceRange>,
    pub configurable_options: Option<Vec<ConfigurableOption>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRef {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub url_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub minimum_price: Option<PriceBand>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceBand {
    pub final_price: Option<Money>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Money {
    pub value: Option<f64>,
    pub currency: Option<String>,
}

impl PriceRange {
    pub fn final_price(&self) -> Option<&Money> {
        self.minimum_price.as_ref()?.final_price.as_ref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichText {
    pub html: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlainText {
    pub plaintext: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_publishUrl")]
    pub publish_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurableOption {
    pub uid: Option<String>,
    pub attribute_code: Option<String>,
    pub label: Option<String>,
    pub values: Option<Vec<ConfigurableOptionValue>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurableOptionValue {
    pub uid: Option<String>,
    pub label: Option<String>,
}

/// CMS decoration for a category page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryExtension {
    pub banner: Option<AssetRef>,
    pub description: Option<PlainText>,
    pub styling: Option<String>,
    #[serde(rename = "highlightedProducts")]
    pub highlighted_products: Option<Vec<String>>,
}

/// CMS decoration for a product page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductExtension {
    pub banner: Option<AssetRef>,
    pub stylist: Option<PlainText>,
    pub styling: Option<String>,
}
