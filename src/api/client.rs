use crate::config::WidgetConfig;
use crate::error::{WidgetError, WidgetResult};
use crate::types::{SourceCitation, deserialize_sources};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryRequest {
    pub message: String,
    /// Serialized as `null` when the question carries no selection.
    pub selected_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    #[serde(default, deserialize_with = "deserialize_sources")]
    pub sources: Vec<SourceCitation>,
    #[serde(default)]
    pub query_time_ms: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Transport seam between the widgets and the remote service.
#[async_trait(?Send)]
pub trait Backend {
    async fn query(&self, request: &QueryRequest) -> WidgetResult<QueryResponse>;

    /// Returns the translated text.
    async fn translate(&self, request: &TranslateRequest) -> WidgetResult<String>;
}

/// HTTP implementation over reqwest (fetch on wasm).
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    query_url: String,
    translate_url: String,
}

impl BackendClient {
    pub fn from_config(config: &WidgetConfig) -> WidgetResult<Self> {
        Ok(Self {
            client: Client::new(),
            query_url: config.query_endpoint()?,
            translate_url: config.translate_endpoint()?,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> WidgetResult<String> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            tracing::warn!(url, status = status.as_u16(), "backend returned an error status");
            Err(WidgetError::from_status(status.as_u16(), body))
        }
    }
}

#[async_trait(?Send)]
impl Backend for BackendClient {
    async fn query(&self, request: &QueryRequest) -> WidgetResult<QueryResponse> {
        tracing::debug!(
            with_context = request.selected_text.is_some(),
            "sending textbook query"
        );
        let body = self.post_json(&self.query_url, request).await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;
        tracing::info!(
            sources = parsed.sources.len(),
            query_time_ms = parsed.query_time_ms,
            "textbook query answered"
        );
        Ok(parsed)
    }

    async fn translate(&self, request: &TranslateRequest) -> WidgetResult<String> {
        tracing::debug!(
            language = %request.target_language,
            chars = request.text.chars().count(),
            "sending translation request"
        );
        let body = self.post_json(&self.translate_url, request).await?;
        let parsed: TranslateResponse = serde_json::from_str(&body)?;
        Ok(parsed.translated_text)
    }
}

/// Stand-in used when no backend URL is configured: every call fails with
/// [`WidgetError::ConfigurationMissing`] at the point a request would be sent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconfigured;

#[async_trait(?Send)]
impl Backend for Unconfigured {
    async fn query(&self, _request: &QueryRequest) -> WidgetResult<QueryResponse> {
        Err(WidgetError::ConfigurationMissing)
    }

    async fn translate(&self, _request: &TranslateRequest) -> WidgetResult<String> {
        Err(WidgetError::ConfigurationMissing)
    }
}

/// Pick the HTTP client when configured, otherwise [`Unconfigured`].
pub fn backend_from_config(config: &WidgetConfig) -> Rc<dyn Backend> {
    match BackendClient::from_config(config) {
        Ok(client) => Rc::new(client),
        Err(err) => {
            tracing::warn!(error = %err, "textbook backend unavailable");
            Rc::new(Unconfigured)
        }
    }
}
