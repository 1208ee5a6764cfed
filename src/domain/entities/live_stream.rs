use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a live stream record (database BIGSERIAL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiveStreamId(i64);

impl LiveStreamId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LiveStreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LiveStreamId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Metadata describing a broadcast the platform can point readers at
///
/// At most one record is active at a time; repositories enforce this when saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStream {
    pub id: LiveStreamId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a live stream
#[derive(Debug, Clone, Default)]
pub struct LiveStreamChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl LiveStream {
    /// Create a new live stream (without database ID - will be assigned on insert)
    #[must_use]
    pub fn new(title: String, url: String, description: Option<String>, active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: LiveStreamId::new(0),
            title,
            url,
            description,
            active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_changes(&mut self, changes: LiveStreamChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(url) = changes.url {
            self.url = url;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(active) = changes.active {
            self.active = active;
        }

        self.updated_at = Utc::now();
    }
}
