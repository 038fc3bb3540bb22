use tracing::Level;

pub fn parse_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .try_init();
}

// The browser console is reached through the dioxus logger on the web.
#[cfg(all(target_arch = "wasm32", feature = "dioxus"))]
pub fn init(level: &str) {
    let _ = dioxus::logger::init(parse_level(level));
}

#[cfg(all(target_arch = "wasm32", not(feature = "dioxus")))]
pub fn init(_level: &str) {}
