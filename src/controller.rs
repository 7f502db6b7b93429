//! Application Controller
//!
//! Two states, derived from the token store: logged out shows the login
//! form, logged in shows the list. Every mutation waits for the server,
//! then re-fetches and re-renders the whole list.

use std::rc::Rc;

use todo_api::{ApiClient, ClientError, Credentials, TodoItem, TokenStore};

use crate::surface::{Screen, UiSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    LoggedOut,
    LoggedIn,
}

#[derive(Clone)]
pub struct Controller {
    api: ApiClient,
    tokens: Rc<dyn TokenStore>,
    surface: Rc<dyn UiSurface>,
}

impl Controller {
    pub fn new(api: ApiClient, tokens: Rc<dyn TokenStore>, surface: Rc<dyn UiSurface>) -> Self {
        Self { api, tokens, surface }
    }

    pub fn session(&self) -> Session {
        if self.tokens.is_present() {
            Session::LoggedIn
        } else {
            Session::LoggedOut
        }
    }

    /// Pick the first screen from token presence
    pub async fn start(&self) {
        log::info!("Starting in {:?}", self.session());
        match self.session() {
            Session::LoggedIn => self.show_list().await,
            Session::LoggedOut => self.show_login(),
        }
    }

    pub fn show_login(&self) {
        self.surface.render(Screen::Login);
    }

    /// Fetch the list and replace the root with it. On failure the current
    /// view stays and the error is shown.
    pub async fn show_list(&self) {
        match self.api.list_todos().await {
            Ok(items) => self.render_list(items),
            Err(e) => self.report("Loading todos", e),
        }
    }

    fn render_list(&self, items: Vec<TodoItem>) {
        log::info!("Loaded {} todos", items.len());
        self.surface.clear_error();
        self.surface.render(Screen::List(items));
    }

    /// The token only counts once the first list fetch succeeds, so a
    /// failed fetch leaves the session logged out along with the view
    pub async fn login(&self, credentials: Credentials) {
        let resp = match self.api.login(&credentials).await {
            Ok(resp) => resp,
            Err(e) => return self.report("Login", e),
        };
        log::info!("Logged in as {}", credentials.username);
        self.tokens.set(&resp.token);

        match self.api.list_todos().await {
            Ok(items) => self.render_list(items),
            Err(e) => {
                self.tokens.clear();
                self.report("Loading todos", e);
            }
        }
    }

    pub fn logout(&self) {
        log::info!("Logged out");
        self.tokens.clear();
        self.surface.clear_error();
        self.show_login();
    }

    /// The loading indicator stays up for the request and the re-render
    pub async fn create_todo(&self, body: String) {
        self.surface.set_loading(true);
        match self.api.create_todo(&body).await {
            Ok(item) => {
                log::debug!("Created todo {}", item.id);
                self.show_list().await;
            }
            Err(e) => self.report("Adding todo", e),
        }
        self.surface.set_loading(false);
    }

    pub async fn delete_todo(&self, id: u64) {
        match self.api.delete_todo(id).await {
            Ok(()) => self.show_list().await,
            Err(e) => self.report("Deleting todo", e),
        }
    }

    /// Flip `complete` relative to the copy that was rendered. After a
    /// failure the list is re-fetched so rows match the server again.
    pub async fn toggle_complete(&self, item: &TodoItem) {
        match self.api.update_complete(item.id, !item.complete).await {
            Ok(()) => self.show_list().await,
            Err(e) => {
                let unauthorized = e.is_unauthorized();
                self.report("Updating todo", e);
                if !unauthorized {
                    self.resync().await;
                }
            }
        }
    }

    /// Re-render from the server without touching the error banner
    async fn resync(&self) {
        match self.api.list_todos().await {
            Ok(items) => self.surface.render(Screen::List(items)),
            Err(e) => log::warn!("Resync after failure did not load todos: {}", e),
        }
    }

    fn report(&self, action: &str, err: ClientError) {
        log::error!("{} failed: {}", action, err);

        // A rejected token while logged in is stale; drop it and start over
        if err.is_unauthorized() && self.session() == Session::LoggedIn {
            self.tokens.clear();
            self.show_login();
        }
        self.surface.show_error(format!("{} failed: {}", action, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::RowContent;
    use std::cell::RefCell;
    use todo_api::testing::FakeServer;
    use todo_api::{MemoryTokenStore, Method, SessionMirror};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Render(Screen),
        Loading(bool),
        Error(String),
        ClearError,
    }

    #[derive(Default)]
    struct RecordingSurface {
        events: RefCell<Vec<Event>>,
    }

    impl RecordingSurface {
        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        fn last_screen(&self) -> Option<Screen> {
            self.events.borrow().iter().rev().find_map(|e| match e {
                Event::Render(screen) => Some(screen.clone()),
                _ => None,
            })
        }

        fn errors(&self) -> Vec<String> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Error(msg) => Some(msg.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl UiSurface for RecordingSurface {
        fn render(&self, screen: Screen) {
            self.events.borrow_mut().push(Event::Render(screen));
        }

        fn set_loading(&self, loading: bool) {
            self.events.borrow_mut().push(Event::Loading(loading));
        }

        fn show_error(&self, message: String) {
            self.events.borrow_mut().push(Event::Error(message));
        }

        fn clear_error(&self) {
            self.events.borrow_mut().push(Event::ClearError);
        }
    }

    struct Harness {
        server: Rc<FakeServer>,
        tokens: Rc<MemoryTokenStore>,
        surface: Rc<RecordingSurface>,
        controller: Controller,
    }

    fn harness(tokens: MemoryTokenStore) -> Harness {
        let server = Rc::new(FakeServer::new());
        server.add_user("a", "b", "tok1");
        let tokens = Rc::new(tokens);
        let surface = Rc::new(RecordingSurface::default());
        let api = ApiClient::new(server.clone(), tokens.clone());
        let controller = Controller::new(api, tokens.clone(), surface.clone());
        Harness { server, tokens, surface, controller }
    }

    fn list_of(screen: Option<Screen>) -> Vec<TodoItem> {
        match screen {
            Some(Screen::List(items)) => items,
            other => panic!("expected list view, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_startup_without_token_shows_login() {
        let h = harness(MemoryTokenStore::new());

        h.controller.start().await;

        assert_eq!(h.controller.session(), Session::LoggedOut);
        assert_eq!(h.surface.events(), vec![Event::Render(Screen::Login)]);
        assert!(h.server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_startup_with_token_shows_list() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        h.server.seed_todo(1, "buy milk", false);

        h.controller.start().await;

        assert_eq!(h.controller.session(), Session::LoggedIn);
        let items = list_of(h.surface.last_screen());
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_login_stores_token_and_shows_list() {
        let h = harness(MemoryTokenStore::new());
        h.controller.start().await;

        h.controller.login(Credentials::new("a", "b")).await;

        assert_eq!(h.tokens.get().as_deref(), Some("tok1"));
        assert_eq!(h.controller.session(), Session::LoggedIn);
        assert!(list_of(h.surface.last_screen()).is_empty());
    }

    #[tokio::test]
    async fn test_list_renders_one_unchecked_row() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        h.server
            .respond_next(200, r#"[{"id":1,"userId":1,"body":"buy milk","complete":false}]"#);

        h.controller.show_list().await;

        let items = list_of(h.surface.last_screen());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);

        let rows: Vec<RowContent> = items.iter().map(RowContent::from).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "buy milk");
        assert!(!rows[0].checked);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_login_view() {
        let h = harness(MemoryTokenStore::new());
        h.controller.start().await;

        h.controller.login(Credentials::new("a", "nope")).await;

        assert_eq!(h.tokens.get(), None);
        assert_eq!(h.surface.last_screen(), Some(Screen::Login));
        assert_eq!(
            h.surface.errors(),
            vec!["Login failed: Request failed (401): invalid credentials".to_string()]
        );
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        h.controller.start().await;

        h.controller.logout();

        assert_eq!(h.tokens.get(), None);
        assert_eq!(h.controller.session(), Session::LoggedOut);
        assert_eq!(h.surface.last_screen(), Some(Screen::Login));
    }

    #[tokio::test]
    async fn test_create_rerenders_with_new_item() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        h.controller.start().await;

        h.controller.create_todo("buy milk".to_string()).await;

        let items = list_of(h.surface.last_screen());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "buy milk");
        assert!(!items[0].complete);

        // Loading wraps the request and the re-render
        let events = h.surface.events();
        let start = events.iter().position(|e| *e == Event::Loading(true)).unwrap();
        let end = events.iter().position(|e| *e == Event::Loading(false)).unwrap();
        assert!(start < end);
        assert!(matches!(events[end - 1], Event::Render(Screen::List(_))));
    }

    #[tokio::test]
    async fn test_create_failure_clears_loading() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        h.controller.start().await;
        h.server.set_offline(true);

        h.controller.create_todo("buy milk".to_string()).await;

        let events = h.surface.events();
        assert_eq!(events.last(), Some(&Event::Loading(false)));
        assert_eq!(h.surface.errors().len(), 1);
        assert!(list_of(h.surface.last_screen()).is_empty());
    }

    #[tokio::test]
    async fn test_delete_rerenders_without_item() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        let keep = h.server.seed_todo(1, "keep", false);
        let gone = h.server.seed_todo(1, "gone", false);
        h.controller.start().await;

        h.controller.delete_todo(gone.id).await;

        assert_eq!(list_of(h.surface.last_screen()), vec![keep]);
    }

    #[tokio::test]
    async fn test_toggle_uses_rendered_copy() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        let item = h.server.seed_todo(1, "toggle", false);
        h.controller.start().await;

        h.controller.toggle_complete(&item).await;
        let toggled = list_of(h.surface.last_screen()).remove(0);
        assert!(toggled.complete);

        h.controller.toggle_complete(&toggled).await;
        let restored = list_of(h.surface.last_screen()).remove(0);
        assert_eq!(restored, item);
    }

    #[tokio::test]
    async fn test_missing_item_keeps_view() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        h.server.seed_todo(1, "only", false);
        h.controller.start().await;
        let renders_before = h.surface.events().len();

        h.controller.delete_todo(42).await;

        let events = h.surface.events();
        assert_eq!(events.len(), renders_before + 1);
        assert!(matches!(events.last(), Some(Event::Error(msg)) if msg.contains("404")));
        assert_eq!(h.tokens.get().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_stale_token_returns_to_login() {
        let h = harness(MemoryTokenStore::with_token("revoked"));

        h.controller.start().await;

        assert_eq!(h.tokens.get(), None);
        assert_eq!(h.surface.last_screen(), Some(Screen::Login));
        assert_eq!(h.surface.errors().len(), 1);
    }

    /// Storage backend that accepts writes and keeps nothing
    struct ForgetfulStorage;

    impl TokenStore for ForgetfulStorage {
        fn get(&self) -> Option<String> {
            None
        }

        fn set(&self, _token: &str) {}

        fn clear(&self) {}
    }

    #[tokio::test]
    async fn test_login_works_when_storage_drops_writes() {
        let server = Rc::new(FakeServer::new());
        server.add_user("a", "b", "tok1");
        let tokens: Rc<dyn TokenStore> = Rc::new(SessionMirror::new(ForgetfulStorage));
        let surface = Rc::new(RecordingSurface::default());
        let api = ApiClient::new(server.clone(), tokens.clone());
        let controller = Controller::new(api, tokens.clone(), surface.clone());

        controller.start().await;
        controller.login(Credentials::new("a", "b")).await;

        assert!(surface.errors().is_empty());
        assert!(list_of(surface.last_screen()).is_empty());
        assert_eq!(controller.session(), Session::LoggedIn);
    }

    #[tokio::test]
    async fn test_login_with_failed_first_fetch_stays_logged_out() {
        let h = harness(MemoryTokenStore::new());
        h.controller.start().await;
        h.server.respond_once(Method::Get, "/todos", 500, r#"{"message":"db down"}"#);

        h.controller.login(Credentials::new("a", "b")).await;

        assert_eq!(h.tokens.get(), None);
        assert_eq!(h.controller.session(), Session::LoggedOut);
        assert_eq!(h.surface.last_screen(), Some(Screen::Login));
        assert_eq!(
            h.surface.errors(),
            vec!["Loading todos failed: Request failed (500): db down".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_toggle_rerenders_server_state() {
        let h = harness(MemoryTokenStore::with_token("tok1"));
        let item = h.server.seed_todo(1, "toggle", false);
        h.controller.start().await;
        h.server
            .respond_once(Method::Patch, &format!("/todos/{}", item.id), 500, "");

        h.controller.toggle_complete(&item).await;

        let events = h.surface.events();
        let error_at = events
            .iter()
            .position(|e| matches!(e, Event::Error(_)))
            .unwrap();
        // Re-rendered after the error, and the error is left visible
        assert_eq!(events[error_at + 1..], [Event::Render(Screen::List(vec![item.clone()]))]);

        // The next click still asks for the flip the server has not seen
        h.controller.toggle_complete(&item).await;
        assert!(list_of(h.surface.last_screen())[0].complete);
    }
}
