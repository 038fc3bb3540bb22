use textbook_widgets::config::config;
use textbook_widgets::logging;

fn main() {
    let config = config();
    logging::init(&config.log_level);
    tracing::info!(
        backend = config.backend_url.as_deref().unwrap_or("<unset>"),
        selector = %config.content_selector,
        "mounting textbook widgets"
    );
    dioxus::launch(textbook_widgets::ui::App);
}
