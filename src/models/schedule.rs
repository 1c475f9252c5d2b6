use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    Scheduled,
    Published,
    Failed,
}

/// A content variant placed on a calendar slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPost {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub variant_id: Uuid,
    pub platform: String,
    pub scheduled_for: DateTime<Utc>,
    pub status: PublishStatus,
}
