use std::{
    cell::RefCell,
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use parking_lot::{Mutex, ReentrantMutex};
use tracing::warn;

type Callback = Box<dyn FnMut(Option<&str>) + Send>;

struct Delivery {
    last_version: Option<u64>,
    callback: Callback,
}

struct Watcher {
    active: AtomicBool,
    /// Reentrant so a callback can cancel its own subscription.
    delivery: ReentrantMutex<RefCell<Delivery>>,
}

impl Watcher {
    /// Delivers `value` unless a newer version already reached this watcher.
    fn notify(&self, version: u64, value: Option<&str>) {
        let guard = self.delivery.lock();
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        let Ok(mut delivery) = guard.try_borrow_mut() else {
            warn!("customer token published from inside its own watch callback; change not delivered to that watcher");
            return;
        };
        if delivery.last_version.is_some_and(|last| version <= last) {
            return;
        }
        delivery.last_version = Some(version);
        (&mut *delivery.callback)(value);
    }

    /// Stops deliveries. Returns once no invocation is running on another
    /// thread; called from inside the callback it returns immediately.
    fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        drop(self.delivery.lock());
    }
}

#[derive(Default)]
struct TokenState {
    value: Option<String>,
    version: u64,
    watchers: Vec<Arc<Watcher>>,
}

/// Creates a reactive customer token and the handle that updates it.
pub fn customer_token_channel(initial: Option<String>) -> (TokenPublisher, CustomerToken) {
    let state = Arc::new(Mutex::new(TokenState {
        value: initial,
        ..TokenState::default()
    }));
    (
        TokenPublisher {
            state: state.clone(),
        },
        CustomerToken { state },
    )
}

/// Read side of the customer token exposed by the cart API.
///
/// Callbacks run on the publishing thread with no token lock held, so they
/// may read the token, register watches and cancel subscriptions. They must
/// not publish the token themselves.
#[derive(Clone)]
pub struct CustomerToken {
    state: Arc<Mutex<TokenState>>,
}

impl CustomerToken {
    pub fn value(&self) -> Option<String> {
        self.state.lock().value.clone()
    }

    /// Calls `callback` now with the current token and again on every change,
    /// until the returned subscription is cancelled or dropped.
    ///
    /// If another thread publishes during registration, the newer value may
    /// arrive first and the initial one is skipped.
    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(Option<&str>) + Send + 'static,
    {
        let watcher = Arc::new(Watcher {
            active: AtomicBool::new(true),
            delivery: ReentrantMutex::new(RefCell::new(Delivery {
                last_version: None,
                callback: Box::new(callback),
            })),
        });

        let (version, current) = {
            let mut state = self.state.lock();
            state.watchers.push(watcher.clone());
            (state.version, state.value.clone())
        };
        watcher.notify(version, current.as_deref());

        let state = self.state.clone();
        Subscription::new(move || {
            watcher.deactivate();
            state
                .lock()
                .watchers
                .retain(|other| !Arc::ptr_eq(other, &watcher));
        })
    }

    pub fn watcher_count(&self) -> usize {
        self.state.lock().watchers.len()
    }
}

impl fmt::Debug for CustomerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CustomerToken")
            .field("present", &state.value.is_some())
            .field("version", &state.version)
            .field("watchers", &state.watchers.len())
            .finish()
    }
}

/// Write side of the customer token, held by whoever owns the session.
pub struct TokenPublisher {
    state: Arc<Mutex<TokenState>>,
}

impl TokenPublisher {
    /// Stores `value` and notifies watchers. Setting the current value again
    /// notifies nobody.
    pub fn set(&self, value: Option<String>) {
        let (version, watchers) = {
            let mut state = self.state.lock();
            if state.value == value {
                return;
            }
            state.value = value.clone();
            state.version += 1;
            (state.version, state.watchers.clone())
        };

        for watcher in watchers {
            watcher.notify(version, value.as_deref());
        }
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        self.set(Some(token.into()));
    }

    pub fn sign_out(&self) {
        self.set(None);
    }
}

/// Owned registration of a watch.
///
/// Cancelling more than once is a no-op; dropping cancels.
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
