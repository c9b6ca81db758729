use super::{handlers, ui};
use crate::{
    client::{
        AllBooksData, BookClient, BookNode, FetchPolicy, HttpTransport, PollHandle, QueryCache,
        QuerySnapshot, QueryState, SchemaData, WatchedQuery,
    },
    config::ShelfConfig,
    error::Result,
    form::CreateBookForm,
    model::{BookField, NewBook},
};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use std::{io, time::Duration};
use tokio::{
    runtime::Runtime,
    sync::{mpsc, watch},
};

/// How long the event loop waits for a key before checking for updates.
const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Books,
    Schema,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Books => "Books",
            ViewMode::Schema => "Schema",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ViewMode::Books => ViewMode::Schema,
            ViewMode::Schema => ViewMode::Books,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    CreateModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStrategy {
    /// Re-issue the list query on a fixed interval.
    Polling(Duration),
    /// Fetch once, then only when asked.
    Manual,
}

impl RefreshStrategy {
    /// Policy used when the book list is first loaded.
    pub fn initial_policy(&self, configured: FetchPolicy) -> FetchPolicy {
        match self {
            RefreshStrategy::Polling(_) => configured,
            RefreshStrategy::Manual => FetchPolicy::CacheFirst,
        }
    }

    pub fn label(&self) -> String {
        match self {
            RefreshStrategy::Polling(interval) => format!("polling {}s", interval.as_secs_f32()),
            RefreshStrategy::Manual => "manual".to_string(),
        }
    }
}

/// Work a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    RefetchBooks,
    FetchSchema,
    CreateBook(NewBook),
}

pub struct App {
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub strategy: RefreshStrategy,
    pub books: QueryState<AllBooksData>,
    pub schema: QueryState<SchemaData>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub schema_scroll: u16,
    pub form: CreateBookForm,
    pub focus: BookField,
    pub show_help: bool,
    pub message: Option<String>,
}

impl App {
    pub fn new(strategy: RefreshStrategy) -> Self {
        Self {
            view_mode: ViewMode::default(),
            input_mode: InputMode::Normal,
            strategy,
            books: QueryState::Idle,
            schema: QueryState::Idle,
            selected_index: 0,
            list_state: ListState::default(),
            schema_scroll: 0,
            form: CreateBookForm::new(),
            focus: BookField::Title,
            show_help: false,
            message: None,
        }
    }

    /// Books to render: the current result, or the stale one while loading.
    pub fn book_list(&self) -> &[BookNode] {
        self.books
            .data()
            .map(|data| data.all_books.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_book(&self) -> Option<&BookNode> {
        self.book_list().get(self.selected_index)
    }

    /// Replace the list state, keeping the same book selected when it is
    /// still present.
    pub fn set_books(&mut self, state: QueryState<AllBooksData>) {
        let selected_id = self.selected_book().map(|b| b.id.clone());
        self.books = state;

        let books = self.book_list();
        let index = selected_id
            .and_then(|id| books.iter().position(|b| b.id == id))
            .unwrap_or(self.selected_index);
        let len = books.len();

        self.selected_index = if len == 0 { 0 } else { index.min(len - 1) };
        self.list_state
            .select((len > 0).then_some(self.selected_index));
    }

    pub fn set_schema(&mut self, state: QueryState<SchemaData>) {
        self.schema = state;
    }

    pub fn next(&mut self) {
        let len = self.book_list().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn scroll_schema_down(&mut self) {
        self.schema_scroll = self.schema_scroll.saturating_add(1);
    }

    pub fn scroll_schema_up(&mut self) {
        self.schema_scroll = self.schema_scroll.saturating_sub(1);
    }

    /// Switch between the Books and Schema views.
    ///
    /// The schema is loaded the first time its view is shown.
    pub fn switch_view(&mut self) -> Action {
        self.view_mode = self.view_mode.next();
        match (self.view_mode, &self.schema) {
            (ViewMode::Schema, QueryState::Idle) => Action::FetchSchema,
            _ => Action::None,
        }
    }

    /// Refetch whatever the current view shows.
    pub fn refetch(&mut self) -> Action {
        match self.view_mode {
            ViewMode::Books => {
                self.message = Some("Refreshing…".to_string());
                Action::RefetchBooks
            }
            ViewMode::Schema => Action::FetchSchema,
        }
    }

    pub fn open_create_modal(&mut self) {
        self.focus = BookField::Title;
        self.input_mode = InputMode::CreateModal;
    }

    pub fn close_create_modal(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Validate the form and, if it passes, ask for the mutation.
    pub fn submit_form(&mut self) -> Action {
        match self.form.begin_submit() {
            Some(input) => Action::CreateBook(input),
            None => {
                if let Some(field) = BookField::ALL
                    .into_iter()
                    .find(|f| self.form.errors().get(*f).is_some())
                {
                    self.focus = field;
                }
                Action::None
            }
        }
    }

    /// Record the result of a create request.
    pub fn finish_create(&mut self, result: Result<BookNode>) -> Action {
        self.form.finish_submit(&result);
        if let Some(message) = self.form.status().message() {
            self.message = Some(message.to_string());
        }
        match result {
            Ok(_) => Action::RefetchBooks,
            Err(_) => Action::None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.input_mode {
            InputMode::Normal => handlers::handle_normal_mode(self, key),
            InputMode::CreateModal => handlers::handle_create_modal(self, key),
        }
    }
}

/// Owns the client side of the TUI: watched queries, the polling task and
/// the channel create results come back on.
struct Session {
    client: BookClient,
    books: WatchedQuery<AllBooksData, HttpTransport>,
    schema: WatchedQuery<SchemaData, HttpTransport>,
    books_rx: watch::Receiver<QuerySnapshot<AllBooksData>>,
    schema_rx: watch::Receiver<QuerySnapshot<SchemaData>>,
    created_tx: mpsc::UnboundedSender<Result<BookNode>>,
    created_rx: mpsc::UnboundedReceiver<Result<BookNode>>,
    _poller: Option<PollHandle>,
}

impl Session {
    fn start(
        runtime: &Runtime,
        client: BookClient,
        strategy: RefreshStrategy,
        policy: FetchPolicy,
    ) -> Self {
        let books = client.watch_all_books(strategy.initial_policy(policy));
        let schema = client.watch_schema();
        let books_rx = books.subscribe();
        let schema_rx = schema.subscribe();
        let (created_tx, created_rx) = mpsc::unbounded_channel();

        let initial = books.clone();
        runtime.spawn(async move { initial.fetch().await });

        let _guard = runtime.enter();
        let poller = match strategy {
            RefreshStrategy::Polling(interval) => Some(books.start_polling(interval)),
            RefreshStrategy::Manual => None,
        };

        Self {
            client,
            books,
            schema,
            books_rx,
            schema_rx,
            created_tx,
            created_rx,
            _poller: poller,
        }
    }

    fn perform(&self, runtime: &Runtime, action: Action) {
        match action {
            Action::None | Action::Quit => {}
            Action::RefetchBooks => {
                let books = self.books.clone();
                runtime.spawn(async move { books.refetch().await });
            }
            Action::FetchSchema => {
                let schema = self.schema.clone();
                runtime.spawn(async move { schema.refetch().await });
            }
            Action::CreateBook(input) => {
                let client = self.client.clone();
                let tx = self.created_tx.clone();
                runtime.spawn(async move {
                    let result = client.create_book(&input).await;
                    let _ = tx.send(result);
                });
            }
        }
    }

    /// Copy new query states and finished creates into the app.
    fn sync(&mut self, runtime: &Runtime, app: &mut App) {
        if self.books_rx.has_changed().unwrap_or(false) {
            app.set_books(self.books_rx.borrow_and_update().state.clone());
        }
        if self.schema_rx.has_changed().unwrap_or(false) {
            app.set_schema(self.schema_rx.borrow_and_update().state.clone());
        }
        while let Ok(result) = self.created_rx.try_recv() {
            let action = app.finish_create(result);
            self.perform(runtime, action);
        }
    }
}

pub fn run_tui(config: &ShelfConfig, manual: bool) -> Result<()> {
    let runtime = Runtime::new()?;
    let client = BookClient::connect(config.client.endpoint_url()?, QueryCache::new())?;
    let strategy = if manual {
        RefreshStrategy::Manual
    } else {
        RefreshStrategy::Polling(config.client.poll_interval())
    };
    tracing::info!(
        endpoint = %config.client.endpoint,
        strategy = %strategy.label(),
        "Starting TUI"
    );

    let mut session = Session::start(&runtime, client, strategy, config.client.fetch_policy);
    let mut app = App::new(strategy);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut session, &runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
    runtime: &Runtime,
) -> io::Result<()> {
    loop {
        session.sync(runtime, app);
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Action::Quit => return Ok(()),
                action => session.perform(runtime, action),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: &str, title: &str) -> BookNode {
        BookNode {
            id: id.to_string(),
            title: title.to_string(),
            author: "Author".to_string(),
            content: "Long enough content".to_string(),
        }
    }

    fn loaded(books: Vec<BookNode>) -> QueryState<AllBooksData> {
        QueryState::Success {
            data: AllBooksData { all_books: books },
            fetched_at: Utc::now(),
            from_cache: false,
        }
    }

    #[test]
    fn test_selection_follows_book_across_refresh() {
        let mut app = App::new(RefreshStrategy::Manual);
        app.set_books(loaded(vec![book("1", "Dune"), book("2", "Emma")]));
        app.next();
        assert_eq!(app.selected_book().unwrap().title, "Emma");

        let reordered = vec![book("3", "Beloved"), book("1", "Dune"), book("2", "Emma")];
        app.set_books(loaded(reordered));
        assert_eq!(app.selected_book().unwrap().title, "Emma");
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut app = App::new(RefreshStrategy::Manual);
        app.set_books(loaded(vec![book("1", "Dune"), book("2", "Emma")]));
        app.next();
        app.set_books(loaded(vec![book("9", "Ulysses")]));
        assert_eq!(app.selected_index, 0);
        app.set_books(loaded(Vec::new()));
        assert!(app.selected_book().is_none());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_stale_data_shown_while_loading() {
        let mut app = App::new(RefreshStrategy::Manual);
        app.set_books(QueryState::Loading {
            stale: Some(AllBooksData {
                all_books: vec![book("1", "Dune")],
            }),
        });
        assert_eq!(app.book_list().len(), 1);
    }

    #[test]
    fn test_initial_policy() {
        let polling = RefreshStrategy::Polling(Duration::from_secs(5));
        assert_eq!(
            polling.initial_policy(FetchPolicy::CacheAndNetwork),
            FetchPolicy::CacheAndNetwork
        );
        assert_eq!(
            RefreshStrategy::Manual.initial_policy(FetchPolicy::CacheAndNetwork),
            FetchPolicy::CacheFirst
        );
        assert_eq!(polling.label(), "polling 5s");
    }
}
