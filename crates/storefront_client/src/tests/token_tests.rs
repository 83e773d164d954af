use super::*;
use std::{
    sync::{atomic::AtomicBool, mpsc},
    thread,
    time::Duration,
};

fn recorder() -> (
    Arc<Mutex<Vec<Option<String>>>>,
    impl FnMut(Option<&str>) + Send + 'static,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |value: Option<&str>| {
        sink.lock().push(value.map(str::to_string));
    })
}

fn seen(log: &Arc<Mutex<Vec<Option<String>>>>) -> Vec<Option<String>> {
    log.lock().clone()
}

#[test]
fn watch_calls_back_immediately_with_the_current_value() {
    let (_publisher, token) = customer_token_channel(Some("tok-1".into()));
    let (log, callback) = recorder();

    let _subscription = token.watch(callback);

    assert_eq!(seen(&log), vec![Some("tok-1".to_string())]);
}

#[test]
fn changes_are_delivered_in_order() {
    let (publisher, token) = customer_token_channel(None);
    let (log, callback) = recorder();
    let _subscription = token.watch(callback);

    publisher.sign_in("tok-1");
    publisher.sign_in("tok-1");
    publisher.sign_out();

    assert_eq!(seen(&log), vec![None, Some("tok-1".to_string()), None]);
    assert_eq!(token.value(), None);
}

#[test]
fn no_calls_after_cancel() {
    let (publisher, token) = customer_token_channel(None);
    let (log, callback) = recorder();
    let mut subscription = token.watch(callback);

    subscription.cancel();
    publisher.sign_in("tok-1");

    assert_eq!(seen(&log), vec![None]);
    assert_eq!(token.watcher_count(), 0);
    assert!(!subscription.is_active());
}

#[test]
fn cancel_is_idempotent_without_any_change() {
    let (_publisher, token) = customer_token_channel(None);
    let (_log, callback) = recorder();
    let mut subscription = token.watch(callback);

    subscription.cancel();
    subscription.cancel();
    drop(subscription);

    assert_eq!(token.watcher_count(), 0);
}

#[test]
fn dropping_the_subscription_cancels_it() {
    let (publisher, token) = customer_token_channel(None);
    let (log, callback) = recorder();
    {
        let _subscription = token.watch(callback);
        assert_eq!(token.watcher_count(), 1);
    }

    publisher.sign_in("tok-1");
    assert_eq!(seen(&log), vec![None]);
    assert_eq!(token.watcher_count(), 0);
}

#[test]
fn cancelling_one_watcher_leaves_the_others() {
    let (publisher, token) = customer_token_channel(None);
    let (first_log, first) = recorder();
    let (second_log, second) = recorder();
    let mut first = token.watch(first);
    let _second = token.watch(second);

    first.cancel();
    publisher.sign_in("tok-1");

    assert_eq!(seen(&first_log), vec![None]);
    assert_eq!(seen(&second_log), vec![None, Some("tok-1".to_string())]);
}

#[test]
fn publishes_from_another_thread_reach_the_watcher() {
    let (publisher, token) = customer_token_channel(None);
    let (log, callback) = recorder();
    let _subscription = token.watch(callback);

    std::thread::spawn(move || publisher.sign_in("tok-2"))
        .join()
        .expect("publisher thread");

    assert_eq!(seen(&log), vec![None, Some("tok-2".to_string())]);
}

#[test]
fn a_callback_can_register_another_watch() {
    let (publisher, token) = customer_token_channel(None);
    let (nested_log, nested) = recorder();
    let nested = Arc::new(Mutex::new(Some(nested)));
    let nested_subscription = Arc::new(Mutex::new(None));
    let registering = token.clone();
    let slot = nested_subscription.clone();
    let _subscription = token.watch(move |value| {
        if value.is_some() {
            if let Some(callback) = nested.lock().take() {
                *slot.lock() = Some(registering.watch(callback));
            }
        }
    });

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        publisher.sign_in("tok-1");
        let _ = done_tx.send(publisher);
    });
    let publisher = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("publish returned");

    assert_eq!(seen(&nested_log), vec![Some("tok-1".to_string())]);
    assert_eq!(token.watcher_count(), 2);

    publisher.sign_out();
    assert_eq!(seen(&nested_log), vec![Some("tok-1".to_string()), None]);
}

#[test]
fn a_callback_can_cancel_its_own_subscription() {
    let (publisher, token) = customer_token_channel(None);
    let (log, mut record) = recorder();
    let own: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let handle = own.clone();
    let subscription = token.watch(move |value| {
        record(value);
        if value.is_some() {
            if let Some(mut subscription) = handle.lock().take() {
                subscription.cancel();
            }
        }
    });
    *own.lock() = Some(subscription);

    publisher.sign_in("tok-1");
    publisher.sign_out();

    assert_eq!(seen(&log), vec![None, Some("tok-1".to_string())]);
    assert_eq!(token.watcher_count(), 0);
}

#[test]
fn cancel_waits_for_a_callback_running_on_another_thread() {
    let (publisher, token) = customer_token_channel(None);
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let finished = Arc::new(AtomicBool::new(false));
    let flag = finished.clone();
    let mut subscription = token.watch(move |value| {
        if value.is_some() {
            let _ = entered_tx.send(());
            let _ = release_rx.recv();
            flag.store(true, Ordering::SeqCst);
        }
    });

    let publishing = thread::spawn(move || publisher.sign_in("tok-1"));
    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("callback started");

    let (cancelled_tx, cancelled_rx) = mpsc::channel();
    let cancelling = thread::spawn(move || {
        subscription.cancel();
        let _ = cancelled_tx.send(());
    });
    assert!(cancelled_rx
        .recv_timeout(Duration::from_millis(100))
        .is_err());

    release_tx.send(()).expect("release callback");
    cancelled_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("cancel returned");
    assert!(finished.load(Ordering::SeqCst));

    publishing.join().expect("publisher thread");
    cancelling.join().expect("cancelling thread");
    assert_eq!(token.watcher_count(), 0);
}
