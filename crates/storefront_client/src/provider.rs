use std::{collections::HashMap, future::Future, sync::Arc};

use async_trait::async_trait;
use futures::{future::BoxFuture, FutureExt};

use crate::{
    error::ModuleLoadError,
    module::{Module, ModuleName},
};

/// Source of remote modules for one execution context.
///
/// `Ok(None)` means modules are unavailable here, which is not an error.
#[async_trait]
pub trait ModuleProvider: Send + Sync {
    async fn resolve(&self, name: &ModuleName) -> Result<Option<Module>, ModuleLoadError>;
}

/// Provider for non-interactive contexts. Never imports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableModuleProvider;

#[async_trait]
impl ModuleProvider for UnavailableModuleProvider {
    async fn resolve(&self, _name: &ModuleName) -> Result<Option<Module>, ModuleLoadError> {
        Ok(None)
    }
}

pub type ImportFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Module, ModuleLoadError>> + Send + Sync>;

/// Modules published by a remote container, each behind an import factory
/// that runs every time it is resolved.
#[derive(Clone, Default)]
pub struct ContainerModuleProvider {
    factories: HashMap<ModuleName, ImportFactory>,
}

impl ContainerModuleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expose<F, Fut>(mut self, name: impl Into<ModuleName>, import: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Module, ModuleLoadError>> + Send + 'static,
    {
        let factory: ImportFactory = Arc::new(move || import().boxed());
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn exposes(&self, name: &ModuleName) -> bool {
        self.factories.contains_key(name)
    }
}

#[async_trait]
impl ModuleProvider for ContainerModuleProvider {
    async fn resolve(&self, name: &ModuleName) -> Result<Option<Module>, ModuleLoadError> {
        let factory = self
            .factories
            .get(name)
            .cloned()
            .ok_or_else(|| ModuleLoadError::NotExposed {
                module: name.to_string(),
            })?;
        factory().await.map(Some)
    }
}
