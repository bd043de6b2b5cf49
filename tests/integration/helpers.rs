use artichat::app::{App, AppEvent, AppOptions, handle_app_event, handle_terminal_event};
use artichat::model::{Person, Suggestion};
use artichat::search::{LocalSource, QueryContext, QueryError, QuerySource};
use artichat::store::{ChatStore, KeyValueStore, MemoryStore};
use async_trait::async_trait;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;

/// Build an `App` over in-memory storage with instant queries and replies.
/// No terminal, just state.
pub fn test_app() -> App {
    test_app_on(Arc::new(MemoryStore::new()))
}

pub fn test_app_on(kv: Arc<dyn KeyValueStore>) -> App {
    app_with_source(kv, Arc::new(LocalSource::instant()))
}

pub fn app_with_source(kv: Arc<dyn KeyValueStore>, source: Arc<dyn QuerySource>) -> App {
    let options = AppOptions { char_delay: Duration::ZERO, ..AppOptions::default() };
    App::new(ChatStore::new(kv), Arc::new(QueryContext::new(source)), options)
}

pub fn press(app: &mut App, code: KeyCode) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

pub fn ctrl(app: &mut App, c: char) {
    let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
    handle_terminal_event(app, Event::Key(key));
}

pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

async fn next_event(app: &mut App) -> Option<AppEvent> {
    tokio::time::timeout(Duration::from_secs(5), app.event_rx.recv()).await.ok().flatten()
}

/// Process background events until the dropdown's query has landed.
pub async fn settle_query(app: &mut App) {
    while app.autocomplete.loading {
        let Some(event) = next_event(app).await else {
            break;
        };
        handle_app_event(app, event);
    }
}

/// Process background events until the streamed reply has finished.
pub async fn drain_reply(app: &mut App) {
    while app.is_streaming() {
        let Some(event) = next_event(app).await else {
            break;
        };
        handle_app_event(app, event);
    }
}

/// Query source that always fails, like an unreachable query server.
pub struct FailingSource;

#[async_trait]
impl QuerySource for FailingSource {
    async fn people(&self, _query: &str) -> Result<Vec<Person>, QueryError> {
        Err(QueryError::Status(503))
    }

    async fn suggestions(&self, _query: &str) -> Result<Vec<Suggestion>, QueryError> {
        Err(QueryError::Status(503))
    }
}
