//! Interactive side of the storefront: remote cart modules loaded only in a
//! browser-like context, and local state derived from the cart's customer
//! token.

pub mod bootstrap;
pub mod cart;
pub mod error;
pub mod loader;
pub mod module;
pub mod product_view;
pub mod provider;
pub mod token;
pub mod watcher;

pub use bootstrap::{bootstrap, ClientApp};
pub use error::ModuleLoadError;
pub use loader::CsrModuleLoader;
pub use module::{ExecutionContext, Module, ModuleName};
pub use product_view::{PrimaryAction, ProductView};
pub use provider::{ContainerModuleProvider, ModuleProvider, UnavailableModuleProvider};
pub use token::{customer_token_channel, CustomerToken, Subscription, TokenPublisher};
pub use watcher::CartTokenWatcher;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
