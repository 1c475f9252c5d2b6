use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of a suggested topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    Suggested,
    Approved,
    Rejected,
}

/// A candidate content topic generated by the backend for one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedTopic {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TopicStatus,
}
