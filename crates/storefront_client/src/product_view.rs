use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::watch;
use tracing::info;

use crate::{
    cart::{CartApiModule, CartItemInput},
    watcher::CartTokenWatcher,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    AddToCart,
    SignIn,
}

/// Interactive half of a product page.
///
/// Follows the customer token for as long as it is mounted. Without a cart
/// API the view stays signed out.
#[derive(Debug)]
pub struct ProductView {
    sku: String,
    cart: Option<Arc<CartApiModule>>,
    auth: Option<CartTokenWatcher>,
}

impl ProductView {
    pub fn mount(sku: impl Into<String>, cart: Option<Arc<CartApiModule>>) -> Self {
        let auth = cart
            .as_ref()
            .map(|api| CartTokenWatcher::register(api.customer_token()));
        Self {
            sku: sku.into(),
            cart,
            auth,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth
            .as_ref()
            .is_some_and(CartTokenWatcher::is_authenticated)
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.is_logged_in() {
            PrimaryAction::AddToCart
        } else {
            PrimaryAction::SignIn
        }
    }

    pub fn auth_changes(&self) -> Option<watch::Receiver<bool>> {
        self.auth.as_ref().map(CartTokenWatcher::subscribe)
    }

    /// Adds one unit of the product with the selected option uids.
    pub async fn add_to_cart(&self, options_uids: Vec<String>) -> Result<()> {
        let api = self
            .cart
            .as_ref()
            .ok_or_else(|| anyhow!("cart is not available"))?;
        let item = CartItemInput {
            quantity: 1,
            sku: self.sku.clone(),
            options_uids,
        };
        info!(sku = %item.sku, options = item.options_uids.len(), "adding product to cart");
        api.cart.add_products_to_cart(vec![item]).await
    }

    /// Releases the token subscription.
    pub fn unmount(mut self) {
        if let Some(auth) = self.auth.as_mut() {
            auth.cancel();
        }
    }
}
