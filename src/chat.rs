//! Chat overlay state: the transcript, whether the modal is showing, the
//! selected passage carried as context, and the single in-flight question.

use crate::api::{Backend, QueryRequest, QueryResponse};
use crate::error::{WidgetError, WidgetResult};
use crate::types::ChatMessage;

const CONTEXT_PREVIEW_CHARS: usize = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    OpenEmpty,
    OpenWithContext,
    AwaitingResponse,
}

/// Identifies one question. Responses for a ticket that is no longer
/// current are dropped instead of being applied to a newer transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct PendingQuery {
    pub ticket: Ticket,
    pub request: QueryRequest,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    open: bool,
    context: Option<String>,
    in_flight: Option<Ticket>,
    /// Context the in-flight question was sent with.
    sent_context: Option<String>,
    last_error: Option<String>,
    next_id: u64,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> OverlayState {
        match (self.open, self.in_flight.is_some(), self.context.is_some()) {
            (false, _, _) => OverlayState::Closed,
            (true, true, _) => OverlayState::AwaitingResponse,
            (true, false, true) => OverlayState::OpenWithContext,
            (true, false, false) => OverlayState::OpenEmpty,
        }
    }

    /// Floating icon: always a fresh, context-free question.
    pub fn open_empty(&mut self) {
        self.context = None;
        self.open = true;
    }

    /// Selection button: ask about the passage the reader highlighted.
    pub fn open_with_context(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.context = Some(text).filter(|t| !t.trim().is_empty());
        self.open = true;
    }

    /// Hides the modal. The transcript survives until `clear_messages`.
    pub fn close(&mut self) {
        self.open = false;
        self.context = None;
    }

    /// Append the question optimistically and hand back the request to send.
    /// Returns `None` for blank input or while a question is already in flight.
    pub fn begin_send(&mut self, question: &str) -> Option<PendingQuery> {
        if question.trim().is_empty() || self.in_flight.is_some() {
            return None;
        }

        self.last_error = None;
        self.messages.push(ChatMessage::user(question));

        let ticket = Ticket(self.next_id);
        self.next_id += 1;
        self.in_flight = Some(ticket);
        self.sent_context = self.context.clone();

        Some(PendingQuery {
            ticket,
            request: QueryRequest {
                message: question.to_string(),
                selected_text: self.context.clone(),
            },
        })
    }

    /// Apply the outcome of a question. Every outcome appends exactly one
    /// assistant message, clears loading and drops the selection context it
    /// was sent with. A passage carried in after sending is kept.
    /// Returns `false` when the ticket is stale and nothing was applied.
    pub fn complete(&mut self, ticket: Ticket, outcome: WidgetResult<QueryResponse>) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(?ticket, "discarding response for a stale question");
            return false;
        }

        let message = match outcome {
            Ok(answer) => {
                let mut message = ChatMessage::assistant(answer.response);
                message.sources = answer.sources;
                message.query_time_ms = answer.query_time_ms;
                message
            }
            Err(err) => {
                let detail = describe_failure(&err);
                tracing::warn!(error = %err, "textbook query failed");
                let message = ChatMessage::assistant(format!(
                    "Sorry, I encountered an error: {detail}"
                ));
                self.last_error = Some(detail);
                message
            }
        };

        self.messages.push(message);
        self.in_flight = None;
        if self.context == self.sent_context.take() {
            self.context = None;
        }
        true
    }

    /// Empty the transcript. Any question still in flight is orphaned.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.last_error = None;
        self.in_flight = None;
        self.sent_context = None;
    }

    /// Banner text for the carried selection.
    pub fn context_preview(&self) -> Option<String> {
        self.context.as_deref().map(preview)
    }
}

/// First 150 chars of the passage, always followed by an ellipsis.
pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(CONTEXT_PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Reader-facing wording for a failed question.
pub fn describe_failure(err: &WidgetError) -> String {
    match err {
        WidgetError::RateLimited { .. } => err.to_string(),
        WidgetError::ServerError { .. } => "Server error. Please try again later.".to_string(),
        WidgetError::RequestFailed { .. } => "Failed to get response. Please try again.".to_string(),
        WidgetError::ConfigurationMissing => "Chatbot backend URL is not configured.".to_string(),
        WidgetError::ContentNotFound | WidgetError::NetworkOrParse(_) => err.to_string(),
    }
}

/// Send a pending question and report the outcome.
pub async fn ask<B: Backend + ?Sized>(
    backend: &B,
    pending: &PendingQuery,
) -> WidgetResult<QueryResponse> {
    backend.query(&pending.request).await
}
