//! Render models: raw catalog responses decoded once into fully defaulted
//! values, so views never branch on the shape of a GraphQL response.

use shared::{
    catalog::{
        AssetRef, Category, CategoryExtension, ConfigurableOption, ImageRef, PageEntry,
        PlainText, PriceRange, Product, ProductExtension, ProductSummary,
    },
    domain::PageLink,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub value: f64,
    pub currency: String,
}

impl Price {
    fn from_range(range: Option<&PriceRange>) -> Option<Self> {
        let money = range?.final_price()?;
        Some(Self {
            value: money.value?,
            currency: money.currency.clone().unwrap_or_else(|| "USD".to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub sku: String,
    pub name: String,
    pub url_key: String,
    pub image_url: Option<String>,
    pub image_label: String,
    pub price: Option<Price>,
    pub highlighted: bool,
    /// Only the first card of a listing is loaded eagerly.
    pub priority: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPage {
    pub uid: String,
    pub name: String,
    pub banner_url: Option<String>,
    pub description: Option<String>,
    pub styling: String,
    pub products: Vec<ProductCard>,
}

impl CategoryPage {
    pub fn assemble(category: Category, extension: Option<CategoryExtension>) -> Self {
        let extension = extension.unwrap_or_default();
        let highlighted = extension.highlighted_products.unwrap_or_default();

        let products = category
            .products
            .map(|list| list.into_items())
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, summary)| {
                let is_highlighted = highlighted.contains(&summary.sku);
                product_card(summary, is_highlighted, index == 0)
            })
            .collect();

        Self {
            uid: category.uid,
            name: category.name.unwrap_or_default(),
            banner_url: banner_url(extension.banner),
            description: plaintext(extension.description),
            styling: extension.styling.unwrap_or_default(),
            products,
        }
    }
}

fn product_card(summary: ProductSummary, highlighted: bool, priority: bool) -> ProductCard {
    let image = summary.small_image.unwrap_or_default();
    ProductCard {
        price: Price::from_range(summary.price_range.as_ref()),
        name: summary.name.unwrap_or_default(),
        url_key: summary.url_key.unwrap_or_default(),
        image_url: non_empty(image.url),
        image_label: image.label.unwrap_or_default(),
        highlighted,
        priority,
        sku: summary.sku,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    pub name: String,
    pub url_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionValue {
    pub uid: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductOption {
    pub uid: String,
    pub attribute_code: String,
    pub label: String,
    pub values: Vec<OptionValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub sku: String,
    pub name: String,
    pub description_html: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub gallery: Vec<GalleryImage>,
    pub price: Option<Price>,
    pub options: Vec<ProductOption>,
    pub banner_url: Option<String>,
    pub stylist_note: Option<String>,
    pub styling: String,
}

impl ProductPage {
    pub fn assemble(product: Product, extension: Option<ProductExtension>) -> Self {
        let extension = extension.unwrap_or_default();

        let breadcrumbs = product
            .categories
            .unwrap_or_default()
            .into_iter()
            .filter_map(|category| {
                Some(Breadcrumb {
                    name: non_empty(category.name)?,
                    url_path: category.url_path.unwrap_or_default(),
                })
            })
            .collect();

        let gallery = product
            .media_gallery
            .unwrap_or_default()
            .into_iter()
            .filter_map(gallery_image)
            .collect();

        Self {
            price: Price::from_range(product.price_range.as_ref()),
            name: product.name.unwrap_or_default(),
            description_html: product
                .description
                .and_then(|description| description.html)
                .unwrap_or_default(),
            breadcrumbs,
            gallery,
            options: product
                .configurable_options
                .unwrap_or_default()
                .into_iter()
                .filter_map(product_option)
                .collect(),
            banner_url: banner_url(extension.banner),
            stylist_note: plaintext(extension.stylist),
            styling: extension.styling.unwrap_or_default(),
            sku: product.sku,
        }
    }
}

fn gallery_image(image: ImageRef) -> Option<GalleryImage> {
    Some(GalleryImage {
        url: non_empty(image.url)?,
        label: image.label.unwrap_or_default(),
    })
}

/// Options or values without an id cannot be selected and are left out.
fn product_option(option: ConfigurableOption) -> Option<ProductOption> {
    let uid = non_empty(option.uid)?;
    let label = option.label.unwrap_or_default();
    Some(ProductOption {
        uid,
        attribute_code: option.attribute_code.unwrap_or_else(|| label.clone()),
        label,
        values: option
            .values
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| {
                let uid = non_empty(value.uid)?;
                Some(OptionValue {
                    label: value.label.unwrap_or_else(|| uid.clone()),
                    uid,
                })
            })
            .collect(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    pub title: String,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            title: "Home".to_string(),
        }
    }
}

pub(crate) fn page_link(entry: PageEntry) -> Option<PageLink> {
    let path = non_empty(entry.path)?;
    Some(PageLink {
        title: entry.title.unwrap_or_else(|| path.clone()),
        path,
    })
}

fn banner_url(banner: Option<AssetRef>) -> Option<String> {
    non_empty(banner?.publish_url)
}

fn plaintext(text: Option<PlainText>) -> Option<String> {
    non_empty(text?.plaintext)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
