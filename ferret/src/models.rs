//! Core data model: the searchable document.
//!
//! Documents arrive as one JSON array from the index endpoint and are
//! immutable once loaded. Fields the core does not understand are kept in a
//! passthrough map so hosts can round-trip their own metadata.

use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize};

/// One searchable unit: a title, a body, and the target location.
///
/// Missing or non-string `title`/`body`/`url` deserialize to the empty
/// string rather than failing the whole index load.
///
/// The lower-cased projections are computed on first access and cached,
/// avoiding a re-fold of every document on every keystroke. Module isolation
/// keeps `title`/`body` unwritable after construction, so the caches can
/// never go stale.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Document {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub body: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url: String,
    /// Passthrough fields from the index producer, ignored by the core.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    #[serde(skip)]
    title_lower: OnceLock<String>,
    #[serde(skip)]
    body_lower: OnceLock<String>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
            extra: serde_json::Map::new(),
            title_lower: OnceLock::new(),
            body_lower: OnceLock::new(),
        }
    }

    pub fn title_lower(&self) -> &str {
        self.title_lower.get_or_init(|| self.title.to_lowercase())
    }

    pub fn body_lower(&self) -> &str {
        self.body_lower.get_or_init(|| self.body.to_lowercase())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.body == other.body && self.url == other.url
    }
}

/// Accept any JSON value; anything but a string coerces to `""`.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}
