pub mod shared;

#[cfg(feature = "dioxus")]
pub mod chat;
#[cfg(feature = "dioxus")]
pub mod translate;

#[cfg(feature = "dioxus")]
pub use chat::{ChatLauncher, ChatOverlay, SelectionButton};
#[cfg(feature = "dioxus")]
pub use translate::TranslateBar;
