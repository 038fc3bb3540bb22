use comrak::{ComrakOptions, markdown_to_html as render_markdown};
use once_cell::sync::Lazy;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.footnotes = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    // Answers come from a remote service; raw HTML stays escaped.
    options.render.unsafe_ = false;
    options
});

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

pub fn markdown_to_html(md: &str) -> String {
    render_markdown(md, &MARKDOWN_OPTIONS)
}

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

/// Backend timing as shown under an answer: `850ms`, `1.2s`, `14s`.
pub fn summarize_query_time(query_time_ms: f64) -> String {
    // Thresholds are checked after rounding so 999.7ms never prints as 1000ms.
    let ms = query_time_ms.max(0.0).round();
    if ms < 1000.0 {
        return format!("{ms:.0}ms");
    }
    let tenths = (ms / 100.0).round() / 10.0;
    if tenths >= 10.0 {
        format!("{:.0}s", ms / 1000.0)
    } else {
        format!("{tenths:.1}s")
    }
}

/// Relevance as a whole percentage, clamped to 0..=100.
pub fn relevance_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}
