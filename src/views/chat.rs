use crate::chat::{ChatSession, ask};
use crate::dom::clear_browser_selection;
use crate::selection::SelectionWatcher;
use crate::types::{ChatMessage, Role, SourceCitation};
use crate::ui::WidgetServices;
use crate::views::shared::{
    format_message_timestamp, markdown_to_html, relevance_percent, summarize_query_time,
};
use dioxus::events::Key;
use dioxus::prelude::*;

fn submit_question(
    mut chat: Signal<ChatSession>,
    mut selection: Signal<SelectionWatcher>,
    mut input: Signal<String>,
    services: Signal<WidgetServices>,
    text: String,
) {
    let Some(pending) = chat.with_mut(|session| session.begin_send(&text)) else {
        return;
    };
    input.set(String::new());
    selection.with_mut(SelectionWatcher::clear);
    clear_browser_selection();

    let backend = services.read().backend.clone();
    spawn(async move {
        let outcome = ask(backend.as_ref(), &pending).await;
        chat.with_mut(|session| session.complete(pending.ticket, outcome));
    });
}

/// Round button pinned to the corner; always opens a context-free chat.
#[component]
pub fn ChatLauncher(chat: Signal<ChatSession>, selection: Signal<SelectionWatcher>) -> Element {
    let mut chat = chat;
    let mut selection = selection;
    rsx! {
        button {
            class: "tw-launcher",
            r#type: "button",
            aria_label: "Open chatbot",
            onclick: move |_| {
                selection.with_mut(SelectionWatcher::clear);
                clear_browser_selection();
                chat.with_mut(ChatSession::open_empty);
            },
            "💬"
        }
    }
}

/// Floating "Chat with AI" button above the reader's selection.
#[component]
pub fn SelectionButton(chat: Signal<ChatSession>, selection: Signal<SelectionWatcher>) -> Element {
    let mut chat = chat;
    let mut selection = selection;
    let Some(anchor) = selection.read().current().map(|state| state.anchor) else {
        return rsx! {};
    };

    rsx! {
        button {
            class: "tw-selection-button",
            r#type: "button",
            style: "left: {anchor.x}px; top: {anchor.y}px;",
            aria_label: "Chat with AI about selected text",
            "data-textbook-selection-button": "true",
            onclick: move |_| {
                if let Some(text) = selection.with_mut(SelectionWatcher::take) {
                    chat.with_mut(|session| session.open_with_context(text));
                }
            },
            "💬 Chat with AI"
        }
    }
}

#[component]
pub fn ChatOverlay(chat: Signal<ChatSession>, selection: Signal<SelectionWatcher>) -> Element {
    let mut chat = chat;
    let mut selection = selection;
    let services = use_context::<Signal<WidgetServices>>();
    let mut input = use_signal(String::new);

    let session = chat.read();
    if !session.is_open() {
        return rsx! {};
    }
    let loading = session.is_loading();
    let context_preview = session.context_preview();
    let messages = session.messages().to_vec();
    let placeholder = if context_preview.is_some() {
        "Ask about the selected text..."
    } else {
        "Ask a question..."
    };
    drop(session);

    let mut close = move || {
        chat.with_mut(ChatSession::close);
        selection.with_mut(SelectionWatcher::clear);
        clear_browser_selection();
    };

    rsx! {
        div { class: "tw-overlay", onclick: move |_| close(),
            div {
                class: "tw-modal",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "tw-modal-header",
                    h3 { "💬 Textbook Assistant" }
                    div { class: "tw-header-actions",
                        button {
                            class: "tw-header-btn",
                            r#type: "button",
                            title: "Clear conversation",
                            disabled: messages.is_empty(),
                            onclick: move |_| chat.with_mut(ChatSession::clear_messages),
                            "Clear"
                        }
                        button {
                            class: "tw-header-btn tw-close",
                            r#type: "button",
                            aria_label: "Close chatbot",
                            onclick: move |_| close(),
                            "✕"
                        }
                    }
                }

                div { class: "tw-transcript",
                    if let Some(preview) = context_preview.as_ref() {
                        div { class: "tw-context-banner",
                            p { strong { "Context:" } " \"{preview}\"" }
                        }
                    }
                    if messages.is_empty() && context_preview.is_none() {
                        div { class: "tw-empty",
                            p { "👋 Hi! I'm your Physical AI textbook assistant." }
                            p { "Ask me anything about the course content!" }
                        }
                    }
                    for (i, msg) in messages.iter().enumerate() {
                        MessageRow { key: "{i}", message: msg.clone() }
                    }
                    if loading {
                        div { class: "tw-row assistant",
                            div { class: "tw-bubble assistant tw-thinking",
                                span { "⏳" }
                                span { "Thinking..." }
                            }
                        }
                    }
                }

                div { class: "tw-composer",
                    input {
                        r#type: "text",
                        name: "question",
                        placeholder: placeholder,
                        value: "{input}",
                        disabled: loading,
                        autofocus: true,
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                submit_question(chat, selection, input, services, input());
                            }
                        },
                    }
                    button {
                        class: "tw-send",
                        r#type: "button",
                        aria_label: "Send question",
                        disabled: loading || input().trim().is_empty(),
                        onclick: move |_| submit_question(chat, selection, input, services, input()),
                        "➤"
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let side = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let timestamp = format_message_timestamp(message.created_at);

    rsx! {
        div { class: "tw-row {side}",
            div { class: "tw-stack",
                div { class: "tw-bubble {side}",
                    if message.is_user() {
                        p { "{message.content}" }
                    } else {
                        div { class: "tw-md", dangerous_inner_html: markdown_to_html(&message.content) }
                    }
                }
                if !message.sources.is_empty() {
                    SourceList { sources: message.sources.clone() }
                }
                if timestamp.is_some() || message.query_time_ms.is_some() {
                    div { class: "tw-meta {side}",
                        if let Some(ts) = timestamp {
                            span { class: "tw-timestamp", "{ts}" }
                        }
                        if let Some(ms) = message.query_time_ms {
                            span { class: "tw-timing", "{summarize_query_time(ms)}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SourceList(sources: Vec<SourceCitation>) -> Element {
    rsx! {
        details { class: "tw-sources",
            summary { "Sources ({sources.len()})" }
            ul {
                for source in sources.iter() {
                    li { key: "{source.chunk_id}",
                        div { class: "tw-source-title",
                            if source.chapter_id > 0 {
                                span { class: "tw-source-chapter", "Chapter {source.chapter_id}" }
                            }
                            span { "{source.section_title}" }
                            if source.relevance_score > 0.0 {
                                span { class: "tw-source-score", "{relevance_percent(source.relevance_score)}%" }
                            }
                        }
                        if !source.preview_text.is_empty() {
                            p { class: "tw-source-preview", "{source.preview_text}" }
                        }
                    }
                }
            }
        }
    }
}
