use chrono::{Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::future::Future;
use std::io;
use std::time::Instant;
use taskboard_api::{MutationOutcome, TaskService};
use taskboard_core::{TaskboardResult, TextInput};
use taskboard_domain::{BoardView, FilterState, FormSubmission, TaskId};
use tokio::sync::mpsc;

use crate::components::{FormAction, FormModal, LoadingIndicator, ToastState};
use crate::dialog::{handle_dialog_input, DialogAction};
use crate::events::{ApiOutcome, Event, EventHandler};
use crate::selection::BoardSelection;
use crate::state::{InFlight, RequestKey, TaskStore};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    Form,
    ConfirmDelete(TaskId),
}

pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub store: TaskStore,
    pub selection: BoardSelection,
    pub search: TextInput,
    pub form: Option<FormModal>,
    pub toasts: ToastState,
    pub loading: LoadingIndicator,
    inflight: InFlight,
    form_tickets: u64,
    service: TaskService,
    events_tx: mpsc::UnboundedSender<Event>,
}

impl App {
    pub fn new(
        service: TaskService,
        filters: FilterState,
        events_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            search: TextInput::with_text(filters.search.clone()),
            store: TaskStore::new(filters),
            selection: BoardSelection::new(),
            form: None,
            toasts: ToastState::default(),
            loading: LoadingIndicator::default(),
            inflight: InFlight::default(),
            form_tickets: 0,
            service,
            events_tx,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn endpoint(&self) -> String {
        self.service.endpoint()
    }

    pub fn board(&self) -> BoardView {
        self.store.board_view(Utc::now())
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.selection.selected_id(&self.board())
    }

    pub fn is_pending(&self, key: RequestKey) -> bool {
        self.inflight.is_pending(key)
    }

    /// Fetches the full list in the background.
    pub fn load_tasks(&mut self) {
        self.loading.show(true);
        let service = self.service.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.load_tasks().await;
            let _ = tx.send(Event::Api(ApiOutcome::Loaded(result)));
        });
    }

    fn spawn_mutation<F>(&mut self, key: RequestKey, form_ticket: Option<u64>, request: F)
    where
        F: Future<Output = TaskboardResult<MutationOutcome>> + Send + 'static,
    {
        if let Err(e) = self.inflight.begin(key) {
            self.toasts.error(format!("Error: {}", e));
            return;
        }
        self.loading.show(true);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            let _ = tx.send(Event::Api(ApiOutcome::Mutated {
                key,
                form_ticket,
                result,
            }));
        });
    }

    fn next_form_ticket(&mut self) -> u64 {
        self.form_tickets += 1;
        self.form_tickets
    }

    pub fn open_create_form(&mut self) {
        let ticket = self.next_form_ticket();
        self.form = Some(FormModal::open_create().with_ticket(ticket));
        self.mode = AppMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.store.find(id) {
            let modal = FormModal::open_edit(task, &Local);
            let ticket = self.next_form_ticket();
            self.form = Some(modal.with_ticket(ticket));
            self.mode = AppMode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        if self.mode == AppMode::Form {
            self.mode = AppMode::Normal;
        }
    }

    pub fn submit_form(&mut self) {
        let Some(modal) = self.form.as_mut() else {
            return;
        };
        let submission = match modal.to_form().submit(&Local) {
            Ok(submission) => submission,
            Err(e) => {
                modal.error = Some(e.to_string());
                return;
            }
        };

        let ticket = Some(modal.ticket());
        let service = self.service.clone();
        match submission {
            FormSubmission::Create(draft) => {
                self.spawn_mutation(RequestKey::Create, ticket, async move {
                    service.create_task(draft).await
                });
            }
            FormSubmission::Update(id, patch) => {
                self.spawn_mutation(RequestKey::Task(id), ticket, async move {
                    service.update_task(id, patch).await
                });
            }
        }
    }

    /// Asks for confirmation before deleting the selected task.
    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.inflight.is_pending(RequestKey::Task(id)) {
            self.toasts.error(format!(
                "Error: Request already in progress for {}",
                RequestKey::Task(id)
            ));
            return;
        }
        self.mode = AppMode::ConfirmDelete(id);
    }

    pub fn confirm_delete(&mut self, id: TaskId) {
        self.mode = AppMode::Normal;
        let service = self.service.clone();
        self.spawn_mutation(RequestKey::Task(id), None, async move {
            service.delete_task(id).await
        });
    }

    fn open_form_ticket(&self) -> Option<u64> {
        self.form.as_ref().map(FormModal::ticket)
    }

    fn replace_tasks(&mut self, tasks: Vec<taskboard_domain::Task>) {
        let selected = self.selected_task_id();
        self.store.replace(tasks);
        if let Some(id) = selected {
            let board = self.board();
            self.selection.select_task(&board, id);
        }
    }

    pub fn handle_outcome(&mut self, outcome: ApiOutcome) {
        self.loading.show(false);
        match outcome {
            ApiOutcome::Loaded(Ok(tasks)) => self.replace_tasks(tasks),
            ApiOutcome::Loaded(Err(e)) => {
                tracing::error!("Failed to load tasks: {}", e);
                self.toasts.error(format!("Error: {}", e));
            }
            ApiOutcome::Mutated {
                key,
                form_ticket,
                result,
            } => {
                self.inflight.finish(key);
                match result {
                    Ok(outcome) => {
                        self.toasts.success(outcome.message);
                        match outcome.reload {
                            Ok(tasks) => self.replace_tasks(tasks),
                            Err(e) => {
                                tracing::error!("Failed to load tasks: {}", e);
                                self.toasts.error(format!("Error: {}", e));
                            }
                        }
                        if form_ticket.is_some() && self.open_form_ticket() == form_ticket {
                            self.close_form();
                        }
                    }
                    Err(e) => {
                        tracing::error!(key = %key, "Request failed: {}", e);
                        self.toasts.error(format!("Error: {}", e));
                    }
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => self.toasts.expire(Instant::now()),
            Event::Api(outcome) => self.handle_outcome(outcome),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key.code),
            AppMode::Search => self.handle_search_key(key.code),
            AppMode::Form => self.handle_form_key(key.code),
            AppMode::ConfirmDelete(id) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_delete(id),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = AppMode::Normal;
                }
                _ => {}
            },
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('n') => self.open_create_form(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit_form(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('r') => self.load_tasks(),
            KeyCode::Char('s') => self.store.filters.cycle_status(),
            KeyCode::Char('p') => self.store.filters.cycle_priority(),
            KeyCode::Char('o') => self.store.filters.cycle_sort(),
            KeyCode::Char('/') => self.mode = AppMode::Search,
            KeyCode::Char('c') | KeyCode::Esc => {
                self.store.filters.clear();
                self.search.clear();
            }
            KeyCode::Char('h') | KeyCode::Left => self.selection.prev_column(),
            KeyCode::Char('l') | KeyCode::Right => self.selection.next_column(),
            KeyCode::Char('j') | KeyCode::Down => {
                let board = self.board();
                self.selection.next(&board);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let board = self.board();
                self.selection.prev(&board);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match handle_dialog_input(&mut self.search, code, true) {
            DialogAction::Edited => {
                self.store.filters.search = self.search.as_str().to_lowercase();
            }
            DialogAction::Confirm => self.mode = AppMode::Normal,
            DialogAction::Cancel => {
                self.search.clear();
                self.store.filters.search.clear();
                self.mode = AppMode::Normal;
            }
            DialogAction::None => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Some(modal) = self.form.as_mut() else {
            self.mode = AppMode::Normal;
            return;
        };
        match modal.handle_key(code) {
            FormAction::Cancel => self.close_form(),
            FormAction::Submit => self.submit_form(),
            FormAction::None => {}
        }
    }
}

/// Runs the interactive board until the user quits.
pub async fn run(service: TaskService, filters: FilterState) -> TaskboardResult<()> {
    let mut events = EventHandler::new();
    let mut app = App::new(service, filters, events.sender());
    tracing::info!("Starting board against {}", app.endpoint());

    let mut terminal = setup_terminal()?;
    app.load_tasks();

    let result = event_loop(&mut app, &mut terminal, &mut events).await;

    events.stop();
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    events: &mut EventHandler,
) -> TaskboardResult<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
