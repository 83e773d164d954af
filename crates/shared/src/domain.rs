use std::fmt;

use serde::{Deserialize, Serialize};

/// Suffix the CMS route table appends to every routable URL.
pub const ROUTE_SUFFIX: &str = ".html";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(CategoryUid);
id_newtype!(ProductSku);

/// Identifier of a catalog entity, as produced by route resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    Category(CategoryUid),
    Product(ProductSku),
}

/// URL segments of a catalog page, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutablePath {
    segments: Vec<String>,
}

impl RoutablePath {
    /// Builds a path from raw segments, dropping empty ones.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|segment| !segment.is_empty())
                .collect(),
        }
    }

    /// Splits a `/`-separated request tail such as `shoes/running`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split('/'))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Key used by the CMS route table, e.g. `shoes/running.html`.
    pub fn lookup_key(&self) -> String {
        format!("{}{ROUTE_SUFFIX}", self.segments.join("/"))
    }
}

/// Outcome of looking a [`RoutablePath`] up in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRecord {
    Category(CategoryUid),
    Product(ProductSku),
    NotFound,
}

impl RouteRecord {
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            Self::Category(uid) => Some(EntityId::Category(uid.clone())),
            Self::Product(sku) => Some(EntityId::Product(sku.clone())),
            Self::NotFound => None,
        }
    }
}

/// Entry of the site-wide page list rendered as navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub title: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_key_joins_segments_and_appends_suffix() {
        let path = RoutablePath::new(["shoes", "running"]);
        assert_eq!(path.lookup_key(), "shoes/running.html");
    }

    #[test]
    fn parse_drops_empty_segments() {
        let path = RoutablePath::parse("/shoes//running/");
        assert_eq!(path.segments(), ["shoes", "running"]);
        assert_eq!(path.lookup_key(), "shoes/running.html");
    }

    #[test]
    fn empty_path_still_has_a_lookup_key() {
        assert_eq!(RoutablePath::parse("").lookup_key(), ".html");
    }

    #[test]
    fn not_found_has_no_entity_id() {
        assert_eq!(RouteRecord::NotFound.entity_id(), None);
        assert_eq!(
            RouteRecord::Product(ProductSku::new("MS10")).entity_id(),
            Some(EntityId::Product(ProductSku::new("MS10")))
        );
    }
}
