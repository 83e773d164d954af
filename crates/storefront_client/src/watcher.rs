use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::token::{CustomerToken, Subscription};

/// Local authentication state derived from the remote customer token.
///
/// Register once per mounted view; the subscription is released by
/// [`CartTokenWatcher::cancel`] or when the watcher is dropped.
#[derive(Debug)]
pub struct CartTokenWatcher {
    authenticated: Arc<watch::Sender<bool>>,
    subscription: Subscription,
}

impl CartTokenWatcher {
    pub fn register(token: &CustomerToken) -> Self {
        let (tx, _rx) = watch::channel(false);
        let authenticated = Arc::new(tx);

        let sink = authenticated.clone();
        let subscription = token.watch(move |value| {
            let present = value.is_some();
            sink.send_if_modified(|current| {
                let changed = *current != present;
                *current = present;
                changed
            });
        });
        debug!(authenticated = *authenticated.borrow(), "watching customer token");

        Self {
            authenticated,
            subscription,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Receiver that observes every change of the authentication state.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn cancel(&mut self) {
        self.subscription.cancel();
    }

    pub fn is_watching(&self) -> bool {
        self.subscription.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::customer_token_channel;

    #[test]
    fn projects_token_presence() {
        let (publisher, token) = customer_token_channel(None);
        let watcher = CartTokenWatcher::register(&token);
        assert!(!watcher.is_authenticated());

        publisher.sign_in("tok-1");
        assert!(watcher.is_authenticated());

        publisher.sign_out();
        assert!(!watcher.is_authenticated());
    }

    #[test]
    fn starts_from_the_current_token() {
        let (_publisher, token) = customer_token_channel(Some("tok-1".into()));
        let watcher = CartTokenWatcher::register(&token);
        assert!(watcher.is_authenticated());
    }

    #[test]
    fn cancelled_watcher_stops_following_the_token() {
        let (publisher, token) = customer_token_channel(None);
        let mut watcher = CartTokenWatcher::register(&token);

        watcher.cancel();
        watcher.cancel();
        publisher.sign_in("tok-1");

        assert!(!watcher.is_watching());
        assert!(!watcher.is_authenticated());
        assert_eq!(token.watcher_count(), 0);
    }

    #[tokio::test]
    async fn receivers_see_sign_in() {
        let (publisher, token) = customer_token_channel(None);
        let watcher = CartTokenWatcher::register(&token);
        let mut changes = watcher.subscribe();

        publisher.sign_in("tok-1");
        changes.changed().await.expect("changed");
        assert!(*changes.borrow());
    }
}
