mod common;

use common::{todo, FakeSource};
use std::sync::Arc;
use todolist_core::{
    ClientConfig, CompletionFilter, ConfigError, NewTodo, SessionError, StatusFilter, TodoPatch,
    TodoSession, TodoStatus,
};

#[test]
fn invalid_config_is_rejected_before_any_io() {
    let config = ClientConfig {
        page_limit: 0,
        ..ClientConfig::default()
    };
    assert!(matches!(
        TodoSession::from_config(config),
        Err(SessionError::Config(ConfigError::ZeroPageLimit))
    ));
}

#[test]
fn default_session_builds_without_network() {
    let session = TodoSession::from_config(ClientConfig::default()).unwrap();
    assert!(session.fetch().current().is_loading());
    assert!(session.records().is_empty());
    assert_eq!(session.config().page_limit, 10);
}

#[tokio::test]
async fn load_mutate_and_rederive() {
    let seed = vec![
        todo(1, "A", false).with_status(TodoStatus::Primary),
        todo(2, "B", true).with_status(TodoStatus::Secondary),
        todo(3, "C", false),
    ];
    let session = TodoSession::with_source(
        ClientConfig::default(),
        Arc::new(FakeSource::serving(seed)),
    );
    let mut changes = session.subscribe_changes();

    assert!(session.fetch().ensure_loaded().await.is_ready());
    assert!(changes.has_changed().unwrap());
    changes.borrow_and_update();

    session
        .mutations()
        .update(1, TodoPatch::completed(true))
        .await
        .unwrap();
    assert!(changes.has_changed().unwrap());

    let done_primary = session.view(
        CompletionFilter::Completed,
        StatusFilter::Only(TodoStatus::Primary),
    );
    assert_eq!(done_primary.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);

    let created = session
        .mutations()
        .create(NewTodo::new("New", false, 1))
        .await
        .unwrap();
    let active: Vec<_> = session
        .view(CompletionFilter::Active, StatusFilter::All)
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(active, vec![3, created.id]);

    session.mutations().delete(3).await.unwrap();
    assert_eq!(session.records().len(), 3);
}
