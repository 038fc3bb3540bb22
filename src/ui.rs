use crate::api::{Backend, backend_from_config};
use crate::chat::ChatSession;
use crate::config::{WidgetConfig, config};
use crate::dom::{DomArticle, PageEvent, clear_browser_selection, next_page_event, subscribe_page_events};
use crate::selection::SelectionWatcher;
use crate::theme::{PALETTE_CSS, WIDGET_CSS};
use crate::views::{ChatLauncher, ChatOverlay, SelectionButton, TranslateBar};
use dioxus::prelude::*;
use std::rc::Rc;

/// Collaborators shared by every widget on the page.
#[derive(Clone)]
pub struct WidgetServices {
    pub backend: Rc<dyn Backend>,
    pub article: DomArticle,
}

impl WidgetServices {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            backend: backend_from_config(config),
            article: DomArticle::new(config.content_selector.clone()),
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(WidgetServices::from_config(config())));
    let selection = use_signal(SelectionWatcher::default);
    let chat = use_signal(ChatSession::default);

    use_page_events(selection);

    rsx! {
        WidgetStyles {}
        TranslateBar {}
        SelectionButton { chat, selection }
        ChatLauncher { chat, selection }
        ChatOverlay { chat, selection }
    }
}

/// Feed document pointer events into the selection watcher for as long as
/// the app is mounted.
fn use_page_events(selection: Signal<SelectionWatcher>) {
    let subscription = use_hook(|| {
        let (mut feed, subscription) = subscribe_page_events();
        let mut selection = selection;
        spawn(async move {
            while let Some(event) = next_page_event(&mut feed).await {
                match event {
                    PageEvent::Released(raw) => {
                        selection.with_mut(|watcher| watcher.observe(&raw));
                    }
                    PageEvent::OutsidePress => {
                        if selection.peek().current().is_some() {
                            selection.with_mut(SelectionWatcher::clear);
                            clear_browser_selection();
                        }
                    }
                }
            }
        });
        Rc::new(subscription)
    });

    use_drop(move || subscription.teardown());
}

#[component]
fn WidgetStyles() -> Element {
    rsx! {
        style { dangerous_inner_html: "{PALETTE_CSS}" }
        style { dangerous_inner_html: "{WIDGET_CSS}" }
    }
}
