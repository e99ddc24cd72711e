//! Integration tests for delivery semantics: fire-and-forget submission,
//! failure isolation, and the record-before-delivery guarantee.

mod common;

use async_trait::async_trait;
use notibus::test_utils::{AsyncRecordingSink, FailingSink, RecordingSink};
use notibus::{AsyncNotifier, Endpoint, Message, Registry, Severity, SeveritySet};
use std::time::Duration;
use tracing_test::traced_test;

#[tokio::test]
async fn test_async_delivery_does_not_block_the_sender() {
    let sink = AsyncRecordingSink::new("webhook").with_delay(Duration::from_millis(100));
    let endpoint = Endpoint::new_async(sink.clone());

    let unit = Message::info("deploy finished")
        .dispatch()
        .to_one(&endpoint)
        .unwrap();
    unit.send().unwrap();

    // Fire-and-forget: the delivery is still in flight.
    assert!(sink.delivered().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sink.texts(), vec!["deploy finished"]);
}

#[tokio::test]
async fn test_broadcast_reaches_sync_and_async_endpoints() {
    let log = RecordingSink::new("log");
    let hook = AsyncRecordingSink::new("hook");
    let registry = Registry::builder()
        .with(Endpoint::new(log.clone()))
        .with(Endpoint::new_async(hook.clone()))
        .build()
        .unwrap();

    registry.to_all(Message::success("nightly build green")).send();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(log.texts(), vec!["nightly build green"]);
    assert_eq!(hook.texts(), vec!["nightly build green"]);
}

#[tokio::test]
#[traced_test]
async fn test_record_happens_even_when_delivery_fails() {
    let endpoint = Endpoint::new(FailingSink::new("down"));

    Message::error("backend unreachable")
        .dispatch()
        .to_one(&endpoint)
        .unwrap()
        .send()
        .unwrap();

    // The message was recorded before the delivery attempt, and the failure
    // stayed inside the dispatch unit.
    assert!(logs_contain("backend unreachable"));
    assert!(logs_contain("notifier delivery failed"));
}

#[tokio::test]
#[traced_test]
async fn test_failing_async_delivery_is_logged_and_contained() {
    struct FlakyHook;

    #[async_trait]
    impl AsyncNotifier for FlakyHook {
        fn name(&self) -> &str {
            "flaky-hook"
        }

        async fn notify(&self, _msg: Message) -> anyhow::Result<()> {
            anyhow::bail!("410 gone")
        }
    }

    let survivor = AsyncRecordingSink::new("survivor");
    let registry = Registry::builder()
        .with(Endpoint::new_async(FlakyHook))
        .with(Endpoint::new_async(survivor.clone()))
        .build()
        .unwrap();

    registry.to_all(Message::warning("cache miss storm")).send();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(survivor.texts(), vec!["cache miss storm"]);
    assert!(logs_contain("notifier delivery failed"));
}

#[tokio::test]
async fn test_suppression_asymmetry_between_direct_and_broadcast_sends() {
    let muted =
        AsyncRecordingSink::new("muted").with_suppressed(SeveritySet::of([Severity::Warning]));
    let open = RecordingSink::new("open");
    let muted_endpoint = Endpoint::new_async(muted.clone());
    let open_endpoint = Endpoint::new(open.clone());

    // Direct single-target send to the suppressed endpoint is a contract
    // violation.
    let direct = Message::warning("low disk")
        .dispatch()
        .to_one(&muted_endpoint);
    assert!(direct.is_err());

    // The same message broadcast skips it silently and still reaches the
    // eligible endpoint.
    Message::warning("low disk")
        .dispatch()
        .to_many([&open_endpoint, &muted_endpoint])
        .send();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(open.texts(), vec!["low disk"]);
    assert!(muted.texts().is_empty());
}
