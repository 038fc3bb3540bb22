//! Client side of the textbook backend.
//!
//! The backend exposes two JSON endpoints:
//!
//! - `POST /api/query` answers a question about the textbook, optionally scoped to
//!   a passage the reader selected, and reports the sections it drew on.
//! - `POST /api/translate` translates a block of text into a target language.
//!
//! Widgets talk to the backend through the [`Backend`] trait so the chat and
//! translate state machines can be driven without a network in tests.
mod client;

pub use client::{
    Backend, BackendClient, QueryRequest, QueryResponse, TranslateRequest, TranslateResponse,
    Unconfigured, backend_from_config,
};
