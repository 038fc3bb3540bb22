//! Reader widgets for the Physical AI textbook site: a selection-aware chat
//! assistant and an in-place article translator.
//!
//! The state machines (`chat`, `selection`, `translate`) and the backend
//! client (`api`) are plain Rust. The Dioxus components and the page bridge
//! are compiled with the `web` or `desktop` feature.
pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod selection;
pub mod theme;
pub mod translate;
pub mod types;
pub mod views;

#[cfg(feature = "dioxus")]
pub mod dom;
#[cfg(feature = "dioxus")]
pub mod ui;

pub use error::{WidgetError, WidgetResult};
