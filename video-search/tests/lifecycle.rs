//! Lifecycle tests for the search controller
//!
//! These drive the controller through its public API with a scripted source,
//! so every call completes exactly when and how the test says.

use std::sync::Arc;

use video_search::{
    ErrorKind, RequestToken, ScriptedSource, SearchController, SearchState, Settled, VideoResult,
};

fn video(title: &str) -> VideoResult {
    VideoResult::new(
        title,
        format!("About {}", title),
        format!("https://img.example/{}.jpg", title),
        format!("https://www.youtube.com/watch?v={}", title),
    )
}

fn setup() -> (ScriptedSource, SearchController) {
    let source = ScriptedSource::new();
    let controller = SearchController::new(Arc::new(source.clone()));
    (source, controller)
}

#[test]
fn fresh_controller_is_idle_with_empty_query() {
    let (_, controller) = setup();
    assert_eq!(controller.state(), &SearchState::Idle);
    assert_eq!(controller.query_text(), "");
}

#[tokio::test]
async fn happy_path_keeps_result_order() {
    let (source, mut controller) = setup();

    controller.set_query_text("cats");
    let token = controller.submit();
    source.wait_for_calls(1).await;
    assert_eq!(source.queries(), ["cats"]);

    assert!(source.resolve(0, vec![video("r1"), video("r2")]));
    assert_eq!(controller.settle().await, Some(Settled::Applied(token)));

    assert_eq!(
        controller.state(),
        &SearchState::Success {
            token,
            results: vec![video("r1"), video("r2")],
        }
    );
}

#[tokio::test]
async fn empty_results_are_success() {
    let (source, mut controller) = setup();

    let token = controller.submit();
    source.wait_for_calls(1).await;
    source.resolve(0, vec![]);
    controller.settle().await;

    assert_eq!(
        controller.state(),
        &SearchState::Success {
            token,
            results: vec![],
        }
    );
}

#[tokio::test]
async fn latest_submission_wins() {
    let (source, mut controller) = setup();

    controller.set_query_text("first");
    let first = controller.submit();
    source.wait_for_calls(1).await;

    controller.set_query_text("second");
    let second = controller.submit();
    source.wait_for_calls(2).await;

    // The first call is still running; it was not cancelled
    assert!(source.is_pending(0));
    assert_eq!(controller.in_flight(), 2);

    source.resolve(0, vec![video("stale")]);
    assert_eq!(controller.settle().await, Some(Settled::Discarded(first)));
    assert_eq!(controller.state(), &SearchState::Loading { token: second });

    source.resolve(1, vec![video("fresh")]);
    assert_eq!(controller.settle().await, Some(Settled::Applied(second)));
    assert_eq!(
        controller.state(),
        &SearchState::Success {
            token: second,
            results: vec![video("fresh")],
        }
    );
    assert_eq!(controller.in_flight(), 0);
}

#[tokio::test]
async fn out_of_order_completion_keeps_latest() {
    let (source, mut controller) = setup();

    controller.submit();
    source.wait_for_calls(1).await;
    let second = controller.submit();
    source.wait_for_calls(2).await;

    // Newer call finishes first, the stale one afterwards
    source.resolve(1, vec![video("fresh")]);
    controller.settle().await;
    source.resolve(0, vec![video("stale")]);
    controller.settle().await;

    assert_eq!(
        controller.state(),
        &SearchState::Success {
            token: second,
            results: vec![video("fresh")],
        }
    );
}

#[tokio::test]
async fn transport_fault_becomes_error() {
    let (source, mut controller) = setup();

    let token = controller.submit();
    source.wait_for_calls(1).await;
    source.fail(0, "connection refused");
    controller.settle().await;

    match controller.state() {
        SearchState::Error { token: t, failure } => {
            assert_eq!(*t, token);
            assert_eq!(failure.kind, ErrorKind::TransportFailure);
            assert!(failure.reason.contains("connection refused"));
        }
        other => panic!("Expected Error state, got {:?}", other),
    }
}

#[tokio::test]
async fn each_subscriber_sees_each_transition_once() {
    let (source, mut controller) = setup();
    let mut a = controller.subscribe();
    let mut b = controller.subscribe();

    let token = controller.submit();
    source.wait_for_calls(1).await;
    source.resolve(0, vec![video("r1")]);
    controller.settle().await;

    let expected = [
        SearchState::Loading { token },
        SearchState::Success {
            token,
            results: vec![video("r1")],
        },
    ];

    for rx in [&mut a, &mut b] {
        for state in &expected {
            assert_eq!(&rx.try_recv().unwrap(), state);
        }
        assert!(rx.try_recv().is_err());
    }
}

#[tokio::test]
async fn stale_resolution_is_not_announced() {
    let (source, mut controller) = setup();
    let mut changes = controller.subscribe();

    let first = controller.submit();
    let second = controller.submit();
    source.wait_for_calls(2).await;
    source.resolve(0, vec![video("stale")]);
    controller.settle().await;

    assert_eq!(changes.try_recv().unwrap(), SearchState::Loading { token: first });
    assert_eq!(changes.try_recv().unwrap(), SearchState::Loading { token: second });
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn settle_latest_skips_over_stale_calls() {
    let (source, mut controller) = setup();

    controller.submit();
    let latest = controller.submit();
    source.wait_for_calls(2).await;
    source.resolve(0, vec![video("stale")]);
    source.resolve(1, vec![video("fresh")]);

    let state = controller.settle_latest().await;
    assert_eq!(state.token(), Some(latest));
    assert_eq!(state.results(), Some(&[video("fresh")][..]));
}

#[tokio::test]
async fn tokens_start_at_one_and_increase() {
    let (_, mut controller) = setup();
    let tokens: Vec<RequestToken> = (0..3).map(|_| controller.submit()).collect();
    let raw: Vec<u64> = tokens.iter().map(|t| t.get()).collect();
    assert_eq!(raw, [1, 2, 3]);
}
