use std::{
    any::{type_name, Any},
    collections::HashMap,
    sync::Arc,
};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::{
    error::ModuleLoadError,
    module::{ExecutionContext, Module, ModuleName},
    provider::{ContainerModuleProvider, ModuleProvider, UnavailableModuleProvider},
};

type LoadResult = Result<Option<Module>, ModuleLoadError>;
type Flight = watch::Receiver<Option<LoadResult>>;

#[derive(Default)]
struct LoaderState {
    resolved: HashMap<ModuleName, Module>,
    inflight: HashMap<ModuleName, Flight>,
}

enum Role {
    Leader(watch::Sender<Option<LoadResult>>),
    Waiter(Flight),
}

/// Loads remote modules at most once per name.
///
/// Concurrent callers for a module that is still importing wait on the same
/// import. A successful import is kept for the life of the loader; a failed
/// or abandoned one is forgotten so the next call tries again.
#[derive(Clone)]
pub struct CsrModuleLoader {
    provider: Arc<dyn ModuleProvider>,
    state: Arc<Mutex<LoaderState>>,
}

impl CsrModuleLoader {
    pub fn new(provider: Arc<dyn ModuleProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(Mutex::new(LoaderState::default())),
        }
    }

    /// Loader backed by `container` when interactive, by nothing otherwise.
    pub fn for_context(context: ExecutionContext, container: ContainerModuleProvider) -> Self {
        match context {
            ExecutionContext::Interactive => Self::new(Arc::new(container)),
            ExecutionContext::Server => Self::new(Arc::new(UnavailableModuleProvider)),
        }
    }

    pub async fn load_on_client(&self, name: &ModuleName) -> LoadResult {
        let role = {
            let mut state = self.state.lock();
            if let Some(module) = state.resolved.get(name) {
                return Ok(Some(module.clone()));
            }
            match state.inflight.get(name) {
                Some(flight) => Role::Waiter(flight.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    state.inflight.insert(name.clone(), rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Waiter(flight) => {
                debug!(module = %name, "joining in-flight import");
                wait_for(name, flight).await
            }
            Role::Leader(tx) => {
                let guard = FlightGuard {
                    name: name.clone(),
                    state: self.state.clone(),
                    tx,
                    completed: false,
                };
                debug!(module = %name, "importing remote module");
                let result = self.provider.resolve(name).await;
                guard.complete(result)
            }
        }
    }

    /// Loads `name` and returns its exports as `T`.
    pub async fn load_as<T: Any + Send + Sync>(
        &self,
        name: &ModuleName,
    ) -> Result<Option<Arc<T>>, ModuleLoadError> {
        let Some(module) = self.load_on_client(name).await? else {
            return Ok(None);
        };
        module
            .downcast::<T>()
            .map(Some)
            .ok_or_else(|| ModuleLoadError::UnexpectedExport {
                module: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    pub fn is_loaded(&self, name: &ModuleName) -> bool {
        self.state.lock().resolved.contains_key(name)
    }
}

async fn wait_for(name: &ModuleName, mut flight: Flight) -> LoadResult {
    loop {
        let published = flight.borrow_and_update().clone();
        if let Some(result) = published {
            return result;
        }
        if flight.changed().await.is_err() {
            return Err(ModuleLoadError::Abandoned {
                module: name.to_string(),
            });
        }
    }
}

/// Publishes the leader's result, or an `Abandoned` error if the leader is
/// dropped before finishing. Either way the in-flight entry is removed.
struct FlightGuard {
    name: ModuleName,
    state: Arc<Mutex<LoaderState>>,
    tx: watch::Sender<Option<LoadResult>>,
    completed: bool,
}

impl FlightGuard {
    fn complete(mut self, result: LoadResult) -> LoadResult {
        self.completed = true;
        {
            let mut state = self.state.lock();
            state.inflight.remove(&self.name);
            if let Ok(Some(module)) = &result {
                state.resolved.insert(self.name.clone(), module.clone());
            }
        }
        let _ = self.tx.send(Some(result.clone()));
        result
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        debug!(module = %self.name, "import abandoned");
        self.state.lock().inflight.remove(&self.name);
        let _ = self.tx.send(Some(Err(ModuleLoadError::Abandoned {
            module: self.name.to_string(),
        })));
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
