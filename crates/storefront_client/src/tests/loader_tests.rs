use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use crate::module::{CART_API, CART_RENDERER};

struct Import {
    calls: Arc<AtomicUsize>,
    gate: Arc<Notify>,
}

impl Import {
    fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            gate: Arc::new(Notify::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Container whose `CART_API` import waits for the gate and fails while
    /// `failures` calls remain.
    fn container(&self, failures: usize) -> ContainerModuleProvider {
        let calls = self.calls.clone();
        let gate = self.gate.clone();
        ContainerModuleProvider::new().expose(CART_API, move || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            let gate = gate.clone();
            async move {
                gate.notified().await;
                if call < failures {
                    Err(ModuleLoadError::Import {
                        module: CART_API.into(),
                        message: "remote entry returned 503".into(),
                    })
                } else {
                    Ok(Module::new(CART_API.into(), format!("cart api #{call}")))
                }
            }
        })
    }
}

#[tokio::test]
async fn concurrent_loads_share_one_import() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(0));
    let name = ModuleName::from(CART_API);

    let (first, second, ()) = tokio::join!(
        loader.load_on_client(&name),
        loader.load_on_client(&name),
        async {
            tokio::task::yield_now().await;
            import.gate.notify_one();
        }
    );

    let first = first.expect("first load").expect("module");
    let second = second.expect("second load").expect("module");
    assert_eq!(import.calls(), 1);
    assert!(first.same_instance(&second));
}

#[tokio::test]
async fn concurrent_loads_across_tasks_share_one_import() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(0));
    let name = ModuleName::from(CART_API);

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let loader = loader.clone();
        let name = name.clone();
        tasks.push(tokio::spawn(async move { loader.load_on_client(&name).await }));
    }
    while import.calls() == 0 {
        tokio::task::yield_now().await;
    }
    import.gate.notify_one();

    let mut modules = Vec::new();
    for task in tasks {
        modules.push(task.await.expect("join").expect("load").expect("module"));
    }
    assert_eq!(import.calls(), 1);
    assert!(modules.iter().all(|module| module.same_instance(&modules[0])));
}

#[tokio::test]
async fn resolved_module_is_reused() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(0));
    let name = ModuleName::from(CART_API);

    import.gate.notify_one();
    let first = loader.load_on_client(&name).await.expect("load").expect("module");
    let second = loader.load_on_client(&name).await.expect("load").expect("module");

    assert!(loader.is_loaded(&name));
    assert_eq!(import.calls(), 1);
    assert!(first.same_instance(&second));
}

#[tokio::test]
async fn server_context_never_imports() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Server, import.container(0));

    let loaded = loader
        .load_on_client(&CART_API.into())
        .await
        .expect("no error outside the client");

    assert!(loaded.is_none());
    assert_eq!(import.calls(), 0);
    assert!(!loader.is_loaded(&CART_API.into()));
}

#[tokio::test]
async fn failure_reaches_every_waiter_and_is_not_cached() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(1));
    let name = ModuleName::from(CART_API);

    let (first, second, ()) = tokio::join!(
        loader.load_on_client(&name),
        loader.load_on_client(&name),
        async {
            tokio::task::yield_now().await;
            import.gate.notify_one();
        }
    );
    let expected = ModuleLoadError::Import {
        module: CART_API.into(),
        message: "remote entry returned 503".into(),
    };
    assert_eq!(first.expect_err("first"), expected);
    assert_eq!(second.expect_err("second"), expected);
    assert_eq!(import.calls(), 1);

    import.gate.notify_one();
    let retried = loader.load_on_client(&name).await.expect("retry");
    assert!(retried.is_some());
    assert_eq!(import.calls(), 2);
}

#[tokio::test]
async fn dropped_leader_releases_waiters() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(0));
    let name = ModuleName::from(CART_API);

    let mut leader = Box::pin(loader.load_on_client(&name));
    assert!(futures::poll!(&mut leader).is_pending());
    let mut waiter = Box::pin(loader.load_on_client(&name));
    assert!(futures::poll!(&mut waiter).is_pending());

    drop(leader);
    let err = waiter.await.expect_err("abandoned");
    assert_eq!(
        err,
        ModuleLoadError::Abandoned {
            module: CART_API.into()
        }
    );

    import.gate.notify_one();
    let retried = loader.load_on_client(&name).await.expect("retry");
    assert!(retried.is_some());
    assert_eq!(import.calls(), 2);
}

#[tokio::test]
async fn typed_load_checks_the_export() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(0));
    import.gate.notify_one();

    let api = loader
        .load_as::<String>(&CART_API.into())
        .await
        .expect("load")
        .expect("module");
    assert_eq!(api.as_str(), "cart api #0");

    let err = loader
        .load_as::<u64>(&CART_API.into())
        .await
        .expect_err("wrong type");
    assert!(matches!(err, ModuleLoadError::UnexpectedExport { expected: "u64", .. }));
}

#[tokio::test]
async fn unknown_module_is_an_error_on_the_client() {
    let import = Import::new();
    let loader = CsrModuleLoader::for_context(ExecutionContext::Interactive, import.container(0));

    let err = loader
        .load_on_client(&CART_RENDERER.into())
        .await
        .expect_err("not exposed");
    assert_eq!(err.module(), CART_RENDERER);
    assert_eq!(import.calls(), 0);
}
