//! Page access through the webview/browser JS bridge.
//!
//! The widgets never own the article element or the document; they read and
//! write them through small scripts evaluated in the page.

use crate::error::{WidgetError, WidgetResult};
use crate::selection::{RawSelection, Subscription};
use crate::translate::{ArticleHost, NASTALIQ_FONT_URL};
use async_trait::async_trait;
use dioxus::prelude::*;
use serde::Deserialize;

/// Attribute marking the floating selection button. Presses on it are not
/// treated as outside clicks.
pub const SELECTION_BUTTON_ATTR: &str = "data-textbook-selection-button";

const LISTENER_SLOT: &str = "__textbookWidgetListeners";

/// Events forwarded from the document listeners.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    Released(RawSelection),
    OutsidePress,
}

fn subscribe_script() -> String {
    format!(
        r#"
const slot = "{LISTENER_SLOT}";
if (window[slot]) {{ window[slot].remove(); }}
const onUp = () => {{
    const selection = window.getSelection();
    const text = selection ? selection.toString() : "";
    if (!selection || selection.rangeCount === 0 || text.trim().length === 0) {{
        dioxus.send({{ kind: "released", text: "", left: 0, top: 0, width: 0, scroll_x: 0, scroll_y: 0 }});
        return;
    }}
    const rect = selection.getRangeAt(0).getBoundingClientRect();
    dioxus.send({{
        kind: "released",
        text,
        left: rect.left,
        top: rect.top,
        width: rect.width,
        scroll_x: window.scrollX,
        scroll_y: window.scrollY,
    }});
}};
const onDown = (event) => {{
    const target = event.target;
    if (target && target.closest && target.closest("[{SELECTION_BUTTON_ATTR}]")) {{ return; }}
    dioxus.send({{ kind: "outside_press" }});
}};
document.addEventListener("mouseup", onUp);
document.addEventListener("mousedown", onDown);
window[slot] = {{
    remove: () => {{
        document.removeEventListener("mouseup", onUp);
        document.removeEventListener("mousedown", onDown);
        delete window[slot];
    }},
}};
await new Promise(() => {{}});
"#
    )
}

fn unsubscribe_script() -> String {
    format!(
        r#"
const slot = "{LISTENER_SLOT}";
if (window[slot]) {{ window[slot].remove(); }}
"#
    )
}

/// Register the pointer listeners. Events arrive on the returned handle; the
/// subscription removes the listeners when torn down or dropped.
pub fn subscribe_page_events() -> (document::Eval, Subscription) {
    let feed = document::eval(&subscribe_script());
    let subscription = Subscription::new(|| {
        tracing::debug!("removing selection listeners");
        let _ = document::eval(&unsubscribe_script());
    });
    (feed, subscription)
}

pub async fn next_page_event(feed: &mut document::Eval) -> Option<PageEvent> {
    match feed.recv::<PageEvent>().await {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::warn!(error = ?err, "selection feed closed");
            None
        }
    }
}

/// Drop the browser's own highlight along with our selection state.
pub fn clear_browser_selection() {
    let _ = document::eval("window.getSelection()?.removeAllRanges();");
}

/// Add the Nastaliq font used by translated pages to the document head once.
pub fn ensure_translation_font() {
    let url = serde_json::to_string(NASTALIQ_FONT_URL).unwrap_or_default();
    let _ = document::eval(&format!(
        r#"
const href = {url};
if (!document.querySelector(`link[href="${{href}}"]`)) {{
    const link = document.createElement("link");
    link.href = href;
    link.rel = "stylesheet";
    document.head.appendChild(link);
}}
"#
    ));
}

/// The article element found with a CSS selector.
#[derive(Clone, Debug, PartialEq)]
pub struct DomArticle {
    selector: String,
}

impl DomArticle {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    fn selector_literal(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string(&self.selector)?)
    }

    async fn run<T: serde::de::DeserializeOwned>(&self, body: &str) -> WidgetResult<Option<T>> {
        let selector = self.selector_literal()?;
        let script = format!(
            "const el = document.querySelector({selector});\nif (!el) {{ return null; }}\n{body}"
        );
        document::eval(&script)
            .join::<Option<T>>()
            .await
            .map_err(|err| WidgetError::NetworkOrParse(format!("page script failed: {err:?}")))
    }
}

#[async_trait(?Send)]
impl ArticleHost for DomArticle {
    async fn read_markup(&self) -> WidgetResult<String> {
        self.run::<String>("return el.innerHTML;")
            .await?
            .ok_or(WidgetError::ContentNotFound)
    }

    async fn write_markup(&self, markup: &str) -> WidgetResult<()> {
        let markup = serde_json::to_string(markup)?;
        self.run::<bool>(&format!("el.innerHTML = {markup};\nreturn true;"))
            .await?
            .map(|_| ())
            .ok_or(WidgetError::ContentNotFound)
    }

    async fn read_text(&self) -> WidgetResult<String> {
        self.run::<String>("return el.innerText;")
            .await?
            .ok_or(WidgetError::ContentNotFound)
    }
}
