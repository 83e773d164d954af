use std::{any::Any, fmt, sync::Arc};

/// Remote cart API: customer token and cart mutations.
pub const CART_API: &str = "StorefrontCart/api";
/// Remote renderer factory.
pub const CART_RENDERER: &str = "StorefrontCart/renderer";
/// Remote mini-cart / panels container component.
pub const CART_PANELS: &str = "StorefrontCart/containers/Panels";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the code is running. Remote modules only exist in an interactive
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Server,
    Interactive,
}

/// A loaded remote module. Cloning shares the same exports.
#[derive(Clone)]
pub struct Module {
    name: ModuleName,
    exports: Arc<dyn Any + Send + Sync>,
}

impl Module {
    pub fn new<T: Any + Send + Sync>(name: ModuleName, exports: T) -> Self {
        Self {
            name,
            exports: Arc::new(exports),
        }
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.exports.clone().downcast::<T>().ok()
    }

    /// True when both handles point at the exports of one import.
    pub fn same_instance(&self, other: &Module) -> bool {
        Arc::ptr_eq(&self.exports, &other.exports)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module").field("name", &self.name).finish()
    }
}
