//! Chat overlay flows driven end to end against a scripted backend.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use textbook_widgets::api::{Backend, QueryRequest, QueryResponse, TranslateRequest, Unconfigured};
use textbook_widgets::chat::{ChatSession, OverlayState, ask};
use textbook_widgets::selection::{RawSelection, SelectionWatcher};
use textbook_widgets::types::{Role, SourceCitation};
use textbook_widgets::{WidgetError, WidgetResult};

#[derive(Default)]
struct ScriptedBackend {
    replies: RefCell<VecDeque<WidgetResult<QueryResponse>>>,
    seen: RefCell<Vec<QueryRequest>>,
}

impl ScriptedBackend {
    fn with(replies: Vec<WidgetResult<QueryResponse>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            seen: RefCell::default(),
        }
    }
}

#[async_trait(?Send)]
impl Backend for ScriptedBackend {
    async fn query(&self, request: &QueryRequest) -> WidgetResult<QueryResponse> {
        self.seen.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(WidgetError::NetworkOrParse("no scripted reply".into())))
    }

    async fn translate(&self, _request: &TranslateRequest) -> WidgetResult<String> {
        Err(WidgetError::RequestFailed {
            status: 404,
            body: "not used".into(),
        })
    }
}

fn answer(text: &str) -> QueryResponse {
    QueryResponse {
        response: text.to_string(),
        sources: vec![SourceCitation {
            chunk_id: "ch2-s1-0".into(),
            chapter_id: 2,
            section_id: "2.1".into(),
            section_title: "Locomotion".into(),
            preview_text: "Wheeled robots...".into(),
            relevance_score: 0.91,
        }],
        query_time_ms: Some(640.0),
    }
}

async fn send(chat: &mut ChatSession, backend: &dyn Backend, question: &str) -> bool {
    let Some(pending) = chat.begin_send(question) else {
        return false;
    };
    let outcome = ask(backend, &pending).await;
    chat.complete(pending.ticket, outcome)
}

fn selection(text: &str) -> RawSelection {
    RawSelection {
        text: text.to_string(),
        left: 40.0,
        top: 120.0,
        width: 180.0,
        scroll_x: 0.0,
        scroll_y: 900.0,
    }
}

#[tokio::test]
async fn selecting_text_opens_chat_with_context() {
    let mut watcher = SelectionWatcher::default();
    let mut chat = ChatSession::default();

    assert!(watcher.observe(&selection("robots move efficiently")));
    let anchor = watcher.current().unwrap().anchor;
    assert_eq!(anchor.x, 40.0 + 90.0 - 60.0);
    assert_eq!(anchor.y, 120.0 + 900.0 - 40.0);

    let text = watcher.take().unwrap();
    chat.open_with_context(text);

    assert_eq!(chat.state(), OverlayState::OpenWithContext);
    let banner = chat.context_preview().unwrap();
    assert!(banner.starts_with("robots move efficiently"));
    assert!(banner.ends_with("..."));
    assert!(watcher.current().is_none());
}

#[tokio::test]
async fn context_is_sent_once_then_dropped() {
    let backend = ScriptedBackend::with(vec![Ok(answer("First")), Ok(answer("Second"))]);
    let mut chat = ChatSession::default();
    chat.open_with_context("robots move efficiently");

    assert!(send(&mut chat, &backend, "What does this mean?").await);
    assert!(send(&mut chat, &backend, "And more generally?").await);

    let seen = backend.seen.borrow();
    assert_eq!(seen[0].selected_text.as_deref(), Some("robots move efficiently"));
    assert_eq!(seen[1].selected_text, None);
}

#[tokio::test]
async fn rate_limit_is_reported_in_transcript() {
    let backend = ScriptedBackend::with(vec![Err(WidgetError::RateLimited {
        body: "too many requests".into(),
    })]);
    let mut chat = ChatSession::default();
    chat.open_empty();

    send(&mut chat, &backend, "Explain PID control").await;

    let last = chat.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.content.contains("Rate limit exceeded"));
    assert!(!chat.is_loading());
    assert_eq!(chat.state(), OverlayState::OpenEmpty);
}

#[tokio::test]
async fn transcript_alternates_across_mixed_outcomes() {
    let backend = ScriptedBackend::with(vec![
        Ok(answer("A")),
        Err(WidgetError::ServerError {
            status: 500,
            body: "trace".into(),
        }),
        Err(WidgetError::RequestFailed {
            status: 422,
            body: "bad".into(),
        }),
        Ok(answer("B")),
    ]);
    let mut chat = ChatSession::default();
    chat.open_empty();

    for question in ["q1", "q2", "q3", "q4", "q5"] {
        send(&mut chat, &backend, question).await;
    }

    let messages = chat.messages();
    assert_eq!(messages.len(), 10);
    for pair in messages.chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
    }
    assert_eq!(messages[1].sources.len(), 1);
    assert!(messages[3].content.contains("Server error"));
    assert!(messages[5].content.contains("Failed to get response"));
    assert!(messages[9].content.contains("no scripted reply"));
}

#[tokio::test]
async fn unconfigured_backend_answers_with_error_message() {
    let mut chat = ChatSession::default();
    chat.open_empty();

    send(&mut chat, &Unconfigured, "Hello?").await;

    let last = chat.messages().last().unwrap();
    assert!(last.content.contains("Chatbot backend URL is not configured."));
}

#[tokio::test]
async fn second_question_waits_for_the_first() {
    let backend = ScriptedBackend::with(vec![Ok(answer("only"))]);
    let mut chat = ChatSession::default();
    chat.open_empty();

    let first = chat.begin_send("first").unwrap();
    assert!(chat.begin_send("second").is_none());

    let outcome = ask(&backend, &first).await;
    chat.complete(first.ticket, outcome);

    assert_eq!(chat.messages().len(), 2);
    assert_eq!(backend.seen.borrow().len(), 1);
}

#[tokio::test]
async fn closing_hides_but_keeps_history() {
    let backend = ScriptedBackend::with(vec![Ok(answer("kept"))]);
    let mut chat = ChatSession::default();
    chat.open_with_context("robots move efficiently");
    send(&mut chat, &backend, "hi").await;

    chat.close();
    assert_eq!(chat.state(), OverlayState::Closed);
    chat.open_empty();
    assert_eq!(chat.messages().len(), 2);
    assert_eq!(chat.messages()[1].content, "kept");
}
