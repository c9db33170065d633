use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taskboard_api::{InMemoryTaskApi, TaskApi, TaskService};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    FilterState, Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus,
};
use taskboard_tui::components::ToastKind;
use taskboard_tui::state::RequestKey;
use taskboard_tui::{App, AppMode, Event};
use tokio::sync::mpsc;

mock! {
    pub Api {}

    #[async_trait]
    impl TaskApi for Api {
        async fn list(&self) -> TaskboardResult<Vec<Task>>;
        async fn create(&self, draft: &TaskDraft) -> TaskboardResult<Task>;
        async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskboardResult<Task>;
        async fn delete(&self, id: TaskId) -> TaskboardResult<()>;
        fn endpoint(&self) -> String;
    }
}

fn task(id: TaskId, title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        priority,
        status,
        due_date: None,
        created_at: None,
        updated_at: None,
    }
}

fn app_with(api: Arc<dyn TaskApi>) -> (App, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(TaskService::new(api), FilterState::default(), tx);
    (app, rx)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Delivers the next completed API action to the app.
async fn settle(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Event>) {
    let event = rx.recv().await.expect("api outcome");
    assert!(matches!(event, Event::Api(_)));
    app.handle_event(event);
}

#[tokio::test]
async fn test_initial_load_fills_columns() {
    let api = InMemoryTaskApi::with_tasks(vec![
        task(1, "T1", TaskStatus::Todo, TaskPriority::High),
        task(2, "T2", TaskStatus::Done, TaskPriority::Low),
    ]);
    let (mut app, mut rx) = app_with(Arc::new(api));

    app.load_tasks();
    assert!(app.loading.is_visible());
    settle(&mut app, &mut rx).await;

    assert!(!app.loading.is_visible());
    let board = app.board();
    assert_eq!(board.column(TaskStatus::Todo).count(), 1);
    assert_eq!(board.column(TaskStatus::InProgress).count(), 0);
    assert_eq!(board.column(TaskStatus::Done).count(), 1);
    assert_eq!(app.selected_task_id(), Some(1));
}

#[tokio::test]
async fn test_create_through_form_reloads_and_closes() {
    let (mut app, mut rx) = app_with(Arc::new(InMemoryTaskApi::new()));

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.mode, AppMode::Form);
    type_text(&mut app, "Write docs");
    press(&mut app, KeyCode::Enter);
    assert!(app.is_pending(RequestKey::Create));

    settle(&mut app, &mut rx).await;

    assert_eq!(app.mode, AppMode::Normal);
    assert!(app.form.is_none());
    assert_eq!(app.store.tasks().len(), 1);
    assert_eq!(app.store.tasks()[0].title, "Write docs");
    let toast = app.toasts.current().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Task created successfully!");
    assert!(!app.is_pending(RequestKey::Create));
}

#[tokio::test]
async fn test_late_create_leaves_newer_create_form_open() {
    let (mut app, mut rx) = app_with(Arc::new(InMemoryTaskApi::new()));

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "First");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);
    assert!(app.form.is_none());

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Second draft");
    settle(&mut app, &mut rx).await;

    assert_eq!(app.mode, AppMode::Form);
    assert_eq!(app.form.as_ref().unwrap().title.as_str(), "Second draft");
    assert_eq!(app.store.tasks().len(), 1);
    assert_eq!(app.store.tasks()[0].title, "First");
    assert_eq!(
        app.toasts.current().unwrap().message,
        "Task created successfully!"
    );
}

#[tokio::test]
async fn test_empty_title_stays_in_form_without_request() {
    let mut api = MockApi::new();
    api.expect_create().never();
    api.expect_endpoint().return_const("mock".to_string());
    let (mut app, _rx) = app_with(Arc::new(api));

    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::Form);
    assert!(app.form.as_ref().unwrap().error.is_some());
    assert!(!app.loading.is_visible());
}

#[tokio::test]
async fn test_failed_create_keeps_form_open() {
    let mut api = MockApi::new();
    api.expect_create()
        .times(1)
        .returning(|_| Err(TaskboardError::http_status(500, "Internal Server Error")));
    api.expect_list().never();
    api.expect_endpoint().return_const("mock".to_string());
    let (mut app, mut rx) = app_with(Arc::new(api));

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Fix bug");
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut rx).await;

    assert_eq!(app.mode, AppMode::Form);
    assert_eq!(app.form.as_ref().unwrap().title.as_str(), "Fix bug");
    assert!(!app.loading.is_visible());
    let toast = app.toasts.current().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.contains("500"));
}

#[tokio::test]
async fn test_delete_with_confirmation_removes_task() {
    let api = InMemoryTaskApi::with_tasks(vec![
        task(1, "keep", TaskStatus::Todo, TaskPriority::Medium),
        task(2, "drop", TaskStatus::Todo, TaskPriority::High),
    ]);
    let (mut app, mut rx) = app_with(Arc::new(api));
    app.load_tasks();
    settle(&mut app, &mut rx).await;

    // Newest-first with no created_at keeps list order, so row 1 is "drop".
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected_task_id(), Some(2));

    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.mode, AppMode::ConfirmDelete(2));
    press(&mut app, KeyCode::Char('y'));
    settle(&mut app, &mut rx).await;

    let board = app.board();
    assert!(board.find_card(2).is_none());
    assert_eq!(board.visible_count(), 1);
    assert_eq!(app.toasts.current().unwrap().message, "Task deleted successfully!");
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let mut api = MockApi::new();
    api.expect_list()
        .times(1)
        .returning(|| Ok(vec![task(3, "x", TaskStatus::Todo, TaskPriority::Low)]));
    api.expect_delete().never();
    api.expect_endpoint().return_const("mock".to_string());
    let (mut app, mut rx) = app_with(Arc::new(api));
    app.load_tasks();
    settle(&mut app, &mut rx).await;

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, AppMode::Normal);
    assert_eq!(app.store.tasks().len(), 1);
}

#[tokio::test]
async fn test_delete_refused_while_edit_is_pending() {
    let api = InMemoryTaskApi::with_tasks(vec![task(
        4,
        "Design API",
        TaskStatus::Todo,
        TaskPriority::Medium,
    )]);
    let (mut app, mut rx) = app_with(Arc::new(api));
    app.load_tasks();
    settle(&mut app, &mut rx).await;

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.mode, AppMode::Form);
    press(&mut app, KeyCode::Enter);
    assert!(app.is_pending(RequestKey::Task(4)));

    // Leave the form while the update is still running and try to delete.
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.mode, AppMode::Normal);
    let toast = app.toasts.current().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.contains("task 4"));

    settle(&mut app, &mut rx).await;
    assert!(!app.is_pending(RequestKey::Task(4)));
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.mode, AppMode::ConfirmDelete(4));
}

#[tokio::test]
async fn test_search_filters_live_on_description() {
    let mut described = task(1, "Alpha", TaskStatus::Todo, TaskPriority::Low);
    described.description = Some("Needs the Quarterly report".to_string());
    let api = InMemoryTaskApi::with_tasks(vec![
        described,
        task(2, "Beta", TaskStatus::InProgress, TaskPriority::Low),
    ]);
    let (mut app, mut rx) = app_with(Arc::new(api));
    app.load_tasks();
    settle(&mut app, &mut rx).await;

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "QUARTER");
    assert_eq!(app.store.filters.search, "quarter");
    assert_eq!(app.board().visible_count(), 1);
    assert!(app.board().find_card(1).is_some());

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, AppMode::Normal);
    assert_eq!(app.board().visible_count(), 2);
}

#[tokio::test]
async fn test_reload_failure_after_delete_shows_error() {
    let mut api = MockApi::new();
    let calls = AtomicUsize::new(0);
    api.expect_list().times(2).returning(move || {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(vec![task(9, "x", TaskStatus::Todo, TaskPriority::Low)])
        } else {
            Err(TaskboardError::transport("connection reset"))
        }
    });
    api.expect_delete().times(1).returning(|_| Ok(()));
    api.expect_endpoint().return_const("mock".to_string());
    let (mut app, mut rx) = app_with(Arc::new(api));
    app.load_tasks();
    settle(&mut app, &mut rx).await;

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Enter);
    settle(&mut app, &mut rx).await;

    // The stale list stays; the error toast replaced the success toast.
    assert_eq!(app.store.tasks().len(), 1);
    assert_eq!(app.toasts.current().unwrap().kind, ToastKind::Error);
    assert!(!app.loading.is_visible());
}
