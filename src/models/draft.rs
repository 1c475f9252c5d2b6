use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review state shared by drafts and their variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Review,
    Approved,
    Rejected,
    PendingApproval,
    NeedsRevision,
}

/// A topic-derived content unit awaiting review before becoming platform variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDraft {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub topic_id: Uuid,
    pub title: String,
    pub status: ContentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// One platform-specific rendering of a draft. Edits bump the version on the
/// backend; the client only ever holds the version it last fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentVariant {
    pub id: Uuid,
    pub draft_id: Uuid,
    pub platform: String,
    pub body: String,
    pub status: ContentStatus,
    pub version: u32,
    pub updated_at: Option<DateTime<Utc>>,
}
