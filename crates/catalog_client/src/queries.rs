/// Named GraphQL document sent to the mesh endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const GET_CATEGORY_BY_ROUTE: Operation = Operation {
    name: "getCategoryByRoute",
    document: r#"query getCategoryByRoute($url: String!) {
  route(url: $url) {
    ... on CategoryInterface {
      uid
    }
  }
}"#,
};

pub const GET_CATEGORY_BY_UID: Operation = Operation {
    name: "getCategoryByUID",
    document: r#"query getCategoryByUID($uid: String!) {
  categories(filters: { category_uid: { eq: $uid } }) {
    items {
      uid
      name
      products {
        items {
          sku
          name
          url_key
          small_image {
            url
            label
          }
          price_range {
            minimum_price {
              final_price {
                value
                currency
              }
            }
          }
        }
      }
    }
  }
  categoryPageExtensionList(filter: { category: { _expressions: [{ value: $uid }] } }) {
    items {
      banner {
        ... on ImageRef {
          _publishUrl
        }
      }
      description {
        plaintext
      }
      styling
      highlightedProducts
    }
  }
}"#,
};

pub const GET_PRODUCT_BY_ROUTE: Operation = Operation {
    name: "getProductByRoute",
    document: r#"query getProductByRoute($url: String!) {
  route(url: $url) {
    ... on ProductInterface {
      sku
    }
  }
}"#,
};

pub const GET_PRODUCT_BY_SKU: Operation = Operation {
    name: "getProductBySku",
    document: r#"query getProductBySku($sku: String!) {
  products(filter: { sku: { eq: $sku } }) {
    items {
      sku
      name
      url_key
      description {
        html
      }
      categories {
        uid
        name
        url_path
      }
      media_gallery {
        url
        label
      }
      price_range {
        minimum_price {
          final_price {
            value
            currency
          }
        }
      }
      ... on ConfigurableProduct {
        configurable_options {
          uid
          attribute_code
          label
          values {
            uid
            label
          }
        }
      }
    }
  }
  productPageExtensionList(filter: { sku: { _expressions: [{ value: $sku }] } }) {
    items {
      banner {
        ... on ImageRef {
          _publishUrl
        }
      }
      stylist {
        plaintext
      }
      styling
    }
  }
}"#,
};

pub const GET_PAGES: Operation = Operation {
    name: "getPages",
    document: r#"query getPages {
  pageList {
    items {
      title
      _path
    }
  }
}"#,
};
