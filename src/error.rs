/// Every failure a widget can hit. All of them are recovered at the widget
/// boundary: chat turns them into assistant messages, translation into inline text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WidgetError {
    #[error("Could not find the main content to translate.")]
    ContentNotFound,

    #[error("Backend URL is not configured.")]
    ConfigurationMissing,

    /// The body is kept for widgets that show the server's own wording.
    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited { body: String },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Request failed {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("{0}")]
    NetworkOrParse(String),
}

impl WidgetError {
    /// Map a non-success HTTP status onto the taxonomy.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            429 => WidgetError::RateLimited { body },
            s if s >= 500 => WidgetError::ServerError { status, body },
            _ => WidgetError::RequestFailed { status, body },
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, WidgetError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        WidgetError::NetworkOrParse(err.to_string())
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::NetworkOrParse(err.to_string())
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::WidgetError;

    #[test]
    fn classifies_statuses() {
        assert_eq!(
            WidgetError::from_status(429, "slow down"),
            WidgetError::RateLimited {
                body: "slow down".to_string()
            }
        );
        assert!(matches!(
            WidgetError::from_status(500, "boom"),
            WidgetError::ServerError { status: 500, .. }
        ));
        assert!(matches!(
            WidgetError::from_status(503, ""),
            WidgetError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            WidgetError::from_status(404, "missing"),
            WidgetError::RequestFailed { status: 404, .. }
        ));
    }
}
