use std::{fmt, sync::Arc};

use tracing::{info, warn};

use crate::{
    cart::{CartApiModule, MountedComponent, PanelsModule, Renderer, RendererConfig, RendererModule},
    error::ModuleLoadError,
    loader::CsrModuleLoader,
    module::{ModuleName, CART_API, CART_PANELS, CART_RENDERER},
};

/// Element the panels container is mounted into.
pub const PANELS_TARGET: &str = "cart-panels";

/// Client application after bootstrap. Every remote piece is optional; the
/// app runs without cart features when one is missing.
#[derive(Default)]
pub struct ClientApp {
    pub renderer: Option<Arc<dyn Renderer>>,
    pub panels: Option<MountedComponent>,
    pub cart: Option<Arc<CartApiModule>>,
}

impl ClientApp {
    pub fn has_cart(&self) -> bool {
        self.cart.is_some()
    }
}

impl fmt::Debug for ClientApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientApp")
            .field("renderer", &self.renderer.is_some())
            .field("panels", &self.panels)
            .field("cart", &self.cart)
            .finish()
    }
}

/// Loads the remote renderer, panels and cart API and mounts the panels.
///
/// Never fails: remote load errors are logged and the affected piece is left
/// out.
pub async fn bootstrap(loader: &CsrModuleLoader, endpoint: &str) -> ClientApp {
    let renderer_name = ModuleName::from(CART_RENDERER);
    let panels_name = ModuleName::from(CART_PANELS);
    let api_name = ModuleName::from(CART_API);

    let (renderer, panels, cart) = futures::join!(
        loader.load_as::<RendererModule>(&renderer_name),
        loader.load_as::<PanelsModule>(&panels_name),
        loader.load_as::<CartApiModule>(&api_name),
    );
    let renderer = available(renderer);
    let panels = available(panels);
    let cart = available(cart);

    let mut app = ClientApp {
        cart,
        ..ClientApp::default()
    };

    let (Some(renderer), Some(panels)) = (renderer, panels) else {
        info!(cart = app.has_cart(), "remote renderer unavailable; panels not mounted");
        return app;
    };

    let render = match renderer.factory.create(&RendererConfig::commerce(endpoint)) {
        Ok(render) => render,
        Err(error) => {
            warn!(%error, "remote renderer could not be created");
            return app;
        }
    };

    match render.mount(panels.component.as_ref(), PANELS_TARGET) {
        Ok(mounted) => {
            info!(component = %mounted.component, target = %mounted.target, "mounted cart panels");
            app.panels = Some(mounted);
        }
        Err(error) => warn!(%error, "cart panels could not be mounted"),
    }
    app.renderer = Some(render);
    app
}

fn available<T>(loaded: Result<Option<Arc<T>>, ModuleLoadError>) -> Option<Arc<T>> {
    match loaded {
        Ok(module) => module,
        Err(error) => {
            warn!(module = %error.module(), %error, "remote module unavailable");
            None
        }
    }
}
