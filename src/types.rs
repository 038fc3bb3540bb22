use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Backend metadata pointing at the textbook section behind part of an answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCitation {
    pub chunk_id: String,
    pub chapter_id: i64,
    pub section_id: String,
    pub section_title: String,
    pub preview_text: String,
    pub relevance_score: f64,
}

impl SourceCitation {
    /// Older deployments of the backend report sources as bare labels.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            chunk_id: label.clone(),
            section_title: label,
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Citation(SourceCitation),
    Label(String),
}

pub(crate) fn deserialize_sources<'de, D>(deserializer: D) -> Result<Vec<SourceCitation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawSource>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|source| match source {
            RawSource::Citation(citation) => citation,
            RawSource::Label(label) => SourceCitation::from_label(label),
        })
        .collect())
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sources: Vec<SourceCitation>,
    pub created_at: Option<OffsetDateTime>,
    pub query_time_ms: Option<f64>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            created_at: Some(current_time()),
            query_time_ms: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources: Vec::new(),
            created_at: Some(current_time()),
            query_time_ms: None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.role, Role::User)
    }
}

/// Page coordinates for the floating selection button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    pub text: String,
    pub anchor: Anchor,
}

pub(crate) fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
