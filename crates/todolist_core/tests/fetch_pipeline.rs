mod common;

use common::{todo, transport_failure, FakeSource};
use std::sync::Arc;
use std::time::Duration;
use todolist_core::{
    ClientConfig, FetchPhase, FetchPipeline, FetchState, MutationPipeline, NewTodo, TodoStore,
};
use tokio::sync::Notify;

fn pipeline(source: &Arc<FakeSource>, store: &Arc<TodoStore>) -> FetchPipeline {
    FetchPipeline::new(
        Arc::clone(source) as _,
        Arc::clone(store),
        10,
        Duration::from_millis(5_000),
    )
}

#[tokio::test]
async fn starts_loading_and_becomes_ready() {
    let source = Arc::new(FakeSource::serving(vec![todo(1, "A", false), todo(2, "B", true)]));
    let store = TodoStore::shared();
    let fetch = pipeline(&source, &store);

    assert_eq!(fetch.current(), FetchState::Loading);

    let state = fetch.load().await;
    assert_eq!(state.records().map(<[_]>::len), Some(2));
    assert_eq!(fetch.current(), state);
    assert_eq!(store.read(), vec![todo(1, "A", false), todo(2, "B", true)]);
}

#[tokio::test]
async fn transport_failure_surfaces_error_and_keeps_store() {
    let source = Arc::new(FakeSource::new(Err(transport_failure())));
    let store = Arc::new(TodoStore::with_records(vec![todo(7, "kept", false)]));
    let fetch = pipeline(&source, &store);

    let state = fetch.load().await;
    assert_eq!(state, FetchState::Error("Failed to fetch todos".to_string()));
    assert_eq!(store.read(), vec![todo(7, "kept", false)]);
    assert_eq!(store.revision(), 0);
}

#[tokio::test]
async fn page_limit_bounds_the_read() {
    let records: Vec<_> = (1..=30).map(|id| todo(id, "row", false)).collect();
    let source = Arc::new(FakeSource::serving(records));
    let store = TodoStore::shared();
    let config = ClientConfig {
        page_limit: 5,
        ..ClientConfig::default()
    };
    let fetch = FetchPipeline::from_config(Arc::clone(&source) as _, Arc::clone(&store), &config);

    fetch.load().await;
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn ensure_loaded_reads_only_once() {
    let source = Arc::new(FakeSource::serving(vec![todo(1, "A", false)]));
    let store = TodoStore::shared();
    let fetch = pipeline(&source, &store);

    fetch.ensure_loaded().await;
    let second = fetch.ensure_loaded().await;
    assert!(second.is_ready());
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn reload_repeats_request_and_replace() {
    let source = Arc::new(FakeSource::serving(vec![todo(1, "A", false)]));
    let store = TodoStore::shared();
    let fetch = pipeline(&source, &store);

    fetch.load().await;
    source.set_fetch_result(Ok(vec![todo(2, "B", false)]));
    fetch.load().await;

    assert_eq!(source.fetch_count(), 2);
    assert_eq!(store.read(), vec![todo(2, "B", false)]);
}

#[tokio::test]
async fn retry_after_error_recovers() {
    let source = Arc::new(FakeSource::new(Err(transport_failure())));
    let store = TodoStore::shared();
    let fetch = pipeline(&source, &store);
    let mut states = fetch.subscribe();

    assert!(fetch.load().await.error_message().is_some());
    assert!(states.has_changed().unwrap());
    assert!(states.borrow_and_update().error_message().is_some());

    source.set_fetch_result(Ok(vec![todo(1, "A", false)]));
    assert!(fetch.load().await.is_ready());
    assert_eq!(source.fetch_count(), 2);
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_read_times_out_as_error() {
    let source = Arc::new(
        FakeSource::serving(vec![todo(1, "A", false)]).with_fetch_delay(Duration::from_secs(30)),
    );
    let store = TodoStore::shared();
    let fetch = pipeline(&source, &store);

    let state = fetch.load().await;
    assert_eq!(
        state,
        FetchState::Error("request timed out after 5000ms".to_string())
    );
    assert!(store.is_empty());
}

async fn wait_for_fetch_calls(source: &FakeSource, calls: usize) {
    while source.fetch_count() < calls {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn ready_state_follows_later_mutations() {
    let source = Arc::new(FakeSource::serving(vec![todo(1, "A", false)]));
    let store = TodoStore::shared();
    let fetch = pipeline(&source, &store);
    let mutations = MutationPipeline::new(Arc::clone(&source) as _, Arc::clone(&store));

    fetch.load().await;
    let created = mutations.create(NewTodo::new("New", false, 1)).await.unwrap();
    mutations.delete(1).await.unwrap();

    let state = fetch.current();
    assert_eq!(state.records(), Some(store.read().as_slice()));
    assert_eq!(state, FetchState::Ready(vec![created]));
}

#[tokio::test]
async fn reload_keeps_ready_data_visible_until_it_lands() {
    let source = Arc::new(FakeSource::serving(vec![todo(1, "A", false)]));
    let store = TodoStore::shared();
    let fetch = Arc::new(pipeline(&source, &store));
    fetch.load().await;

    let gate = Arc::new(Notify::new());
    source.gate_fetches(Arc::clone(&gate));
    source.set_fetch_result(Ok(vec![todo(2, "B", false)]));
    let reload = tokio::spawn({
        let fetch = Arc::clone(&fetch);
        async move { fetch.load().await }
    });

    wait_for_fetch_calls(&source, 2).await;
    assert_eq!(fetch.phase(), FetchPhase::Ready);
    assert_eq!(fetch.current(), FetchState::Ready(vec![todo(1, "A", false)]));

    gate.notify_one();
    assert_eq!(
        reload.await.unwrap(),
        FetchState::Ready(vec![todo(2, "B", false)])
    );
}

#[tokio::test]
async fn reload_after_error_goes_back_to_loading() {
    let source = Arc::new(FakeSource::new(Err(transport_failure())));
    let store = TodoStore::shared();
    let fetch = Arc::new(pipeline(&source, &store));
    assert!(fetch.load().await.error_message().is_some());

    let gate = Arc::new(Notify::new());
    source.gate_fetches(Arc::clone(&gate));
    source.set_fetch_result(Ok(vec![todo(1, "A", false)]));
    let mut phases = fetch.subscribe();
    let reload = tokio::spawn({
        let fetch = Arc::clone(&fetch);
        async move { fetch.load().await }
    });

    phases.wait_for(FetchPhase::is_loading).await.unwrap();
    assert_eq!(fetch.current(), FetchState::Loading);
    assert!(store.is_empty());

    gate.notify_one();
    assert!(reload.await.unwrap().is_ready());
    assert_eq!(fetch.phase(), FetchPhase::Ready);
}
