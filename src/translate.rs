//! Article translation with an exact revert path.
//!
//! The first translation of a page captures the article markup as a
//! [`ContentSnapshot`]. Every later translation restores that snapshot before
//! reading the text, so a page is never translated from an earlier
//! translation. Reverting writes the snapshot back verbatim and discards it.

use crate::api::{Backend, TranslateRequest};
use crate::error::{WidgetError, WidgetResult};
use async_trait::async_trait;

pub const LANGUAGES: &[&str] = &[
    "Urdu", "Sindhi", "Pashto", "Balochi", "English", "Arabic", "Chinese", "French",
];

pub const NASTALIQ_FONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Noto+Nastaliq+Urdu:wght@400;700&display=swap";

const TRANSLATED_BLOCK_OPEN: &str = r#"<div dir="rtl" style="font-family: 'Noto Nastaliq Urdu', sans-serif; font-size: 1.2rem; line-height: 2;">"#;
const TRANSLATED_BLOCK_CLOSE: &str = "</div>";

/// The page's article container. All methods fail with
/// [`WidgetError::ContentNotFound`] when the page has no such element.
#[async_trait(?Send)]
pub trait ArticleHost {
    async fn read_markup(&self) -> WidgetResult<String>;

    async fn write_markup(&self, markup: &str) -> WidgetResult<()>;

    /// Rendered, visible text of the container.
    async fn read_text(&self) -> WidgetResult<String>;
}

/// Article markup captured before the first destructive swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSnapshot(String);

impl ContentSnapshot {
    pub fn markup(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranslationJob {
    ticket: u64,
    pub language: String,
    /// Present when an earlier cycle already captured the original.
    pub snapshot: Option<ContentSnapshot>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranslationOutcome {
    /// Snapshot taken by this run, if it was the first of the cycle.
    pub captured: Option<ContentSnapshot>,
    /// Markup to swap in on success.
    pub result: WidgetResult<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranslateControl {
    language: String,
    translated: bool,
    error: Option<String>,
    snapshot: Option<ContentSnapshot>,
    in_flight: Option<u64>,
    next_id: u64,
}

impl Default for TranslateControl {
    fn default() -> Self {
        Self {
            language: LANGUAGES[0].to_string(),
            translated: false,
            error: None,
            snapshot: None,
            in_flight: None,
            next_id: 0,
        }
    }
}

impl TranslateControl {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_translated(&self) -> bool {
        self.translated
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn button_label(&self) -> String {
        if self.is_loading() {
            "Translating...".to_string()
        } else if self.translated {
            "Show English".to_string()
        } else {
            "Translate".to_string()
        }
    }

    pub fn button_title(&self) -> String {
        if self.translated {
            "Show original English text".to_string()
        } else {
            format!("Translate this chapter to {}", self.language)
        }
    }

    /// Start a translation into the selected language. `None` while busy.
    pub fn begin(&mut self) -> Option<TranslationJob> {
        if self.in_flight.is_some() {
            return None;
        }
        let ticket = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(ticket);
        self.error = None;

        Some(TranslationJob {
            ticket,
            language: self.language.clone(),
            snapshot: self.snapshot.clone(),
        })
    }

    /// Change the target language; an already translated page is
    /// re-translated into the new one. Ignored while a run is in flight.
    pub fn select_language(&mut self, language: impl Into<String>) -> Option<TranslationJob> {
        if self.in_flight.is_some() {
            return None;
        }
        self.language = language.into();
        if self.translated { self.begin() } else { None }
    }

    /// Record a finished run and return the markup to swap in, if any.
    pub fn finish(&mut self, job: &TranslationJob, outcome: TranslationOutcome) -> Option<String> {
        if self.in_flight != Some(job.ticket) {
            tracing::debug!(ticket = job.ticket, "discarding stale translation");
            return None;
        }
        self.in_flight = None;

        if self.snapshot.is_none() {
            self.snapshot = outcome.captured;
        }

        match outcome.result {
            Ok(markup) => {
                self.translated = true;
                self.error = None;
                Some(markup)
            }
            Err(err) => {
                tracing::warn!(error = %err, language = %job.language, "translation failed");
                // The container is showing the restored original at this point.
                self.translated = false;
                self.error = Some(describe_failure(&err));
                None
            }
        }
    }

    /// Surface a failure that happened outside a run (e.g. a DOM write).
    pub fn fail(&mut self, err: &WidgetError) {
        self.error = Some(describe_failure(err));
    }

    /// Drop translated state and hand back the original to write into the
    /// page. Any run still in flight becomes stale.
    pub fn revert(&mut self) -> Option<ContentSnapshot> {
        self.translated = false;
        self.error = None;
        self.in_flight = None;
        self.snapshot.take()
    }
}

/// Restore (or capture) the original, read its text and translate it.
/// The translated markup is returned rather than written so a stale run
/// never touches the page.
pub async fn run<H, B>(host: &H, backend: &B, job: &TranslationJob) -> TranslationOutcome
where
    H: ArticleHost + ?Sized,
    B: Backend + ?Sized,
{
    let mut captured = None;
    let result = async {
        match &job.snapshot {
            Some(snapshot) => host.write_markup(snapshot.markup()).await?,
            None => captured = Some(ContentSnapshot(host.read_markup().await?)),
        }

        let text = host.read_text().await?;
        let translated = backend
            .translate(&TranslateRequest {
                text,
                target_language: job.language.clone(),
            })
            .await?;
        Ok::<_, WidgetError>(render_translation(&translated))
    }
    .await;

    TranslationOutcome { captured, result }
}

/// Escape the translated text, turn newlines into breaks and wrap it in the
/// right-to-left reading block.
pub fn render_translation(text: &str) -> String {
    let mut body = String::with_capacity(text.len() + 16);
    for ch in text.replace("\r\n", "\n").chars() {
        match ch {
            '&' => body.push_str("&amp;"),
            '<' => body.push_str("&lt;"),
            '>' => body.push_str("&gt;"),
            '"' => body.push_str("&quot;"),
            '\'' => body.push_str("&#39;"),
            '\n' => body.push_str("<br />"),
            other => body.push(other),
        }
    }
    format!("{TRANSLATED_BLOCK_OPEN}{body}{TRANSLATED_BLOCK_CLOSE}")
}

/// Inline wording for a failed translation.
pub fn describe_failure(err: &WidgetError) -> String {
    match err {
        WidgetError::ServerError { body, .. }
        | WidgetError::RequestFailed { body, .. }
        | WidgetError::RateLimited { body } => format!("Translation failed: {body}"),
        WidgetError::ConfigurationMissing => "Translation service is not configured.".to_string(),
        WidgetError::ContentNotFound | WidgetError::NetworkOrParse(_) => err.to_string(),
    }
}
