//! Shapes of the remote cart deployment's exports.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;

use crate::token::CustomerToken;

/// Mesh name the renderer is configured with.
pub const COMMERCE_MESH: &str = "Commerce";

/// One line of an add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemInput {
    pub quantity: u32,
    pub sku: String,
    #[serde(rename = "optionsUIDs")]
    pub options_uids: Vec<String>,
}

#[async_trait]
pub trait CartService: Send + Sync {
    async fn add_products_to_cart(&self, items: Vec<CartItemInput>) -> anyhow::Result<()>;
}

/// Exports of the cart API module.
#[derive(Clone)]
pub struct CartApiModule {
    pub customer_token: CustomerToken,
    pub cart: Arc<dyn CartService>,
}

impl CartApiModule {
    pub fn customer_token(&self) -> &CustomerToken {
        &self.customer_token
    }
}

impl fmt::Debug for CartApiModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartApiModule")
            .field("customer_token", &self.customer_token)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RendererConfig {
    pub endpoint: String,
    pub mesh: String,
}

impl RendererConfig {
    pub fn commerce(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            mesh: COMMERCE_MESH.to_string(),
        }
    }
}

/// A remote UI component that can be mounted by a [`Renderer`].
pub trait Component: Send + Sync {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedComponent {
    pub component: String,
    pub target: String,
}

pub trait Renderer: Send + Sync {
    fn mount(&self, component: &dyn Component, target: &str) -> anyhow::Result<MountedComponent>;
}

pub trait RendererFactory: Send + Sync {
    fn create(&self, config: &RendererConfig) -> anyhow::Result<Arc<dyn Renderer>>;
}

/// Exports of the renderer module.
#[derive(Clone)]
pub struct RendererModule {
    pub factory: Arc<dyn RendererFactory>,
}

/// Exports of the panels container module.
#[derive(Clone)]
pub struct PanelsModule {
    pub component: Arc<dyn Component>,
}
