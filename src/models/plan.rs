use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Backend-assigned plan lifecycle status. The client never transitions this; it
/// only reads it to decide which view renders. Values the backend adds later
/// deserialize as `Unknown` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    New,
    GeneratingTopics,
    PendingBlogTopicApproval,
    GeneratingSmTopics,
    PendingDraftApproval,
    GeneratingDrafts,
    Draft,
    Review,
    PendingFinalScheduling,
    Complete,
    Error,
    #[serde(other)]
    Unknown,
}

impl PlanStatus {
    /// True while the backend is generating on our behalf and the client should
    /// keep re-polling the plan query.
    pub fn is_generating(&self) -> bool {
        matches!(
            self,
            PlanStatus::GeneratingTopics | PlanStatus::GeneratingSmTopics | PlanStatus::GeneratingDrafts
        )
    }
}

/// One planning cycle for an organization, with its content quotas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPlan {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub status: PlanStatus,
    pub blog_posts_quota: u32,
    pub sm_posts_quota: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPlanInput {
    pub name: String,
    pub blog_posts_quota: u32,
    pub sm_posts_quota: u32,
}

impl ContentPlanInput {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Plan name is required".to_string());
        }
        if self.blog_posts_quota == 0 {
            errors.insert(
                "blog_posts_quota".to_string(),
                "Blog post quota must be at least 1".to_string(),
            );
        }
        if self.sm_posts_quota == 0 {
            errors.insert(
                "sm_posts_quota".to_string(),
                "Social media post quota must be at least 1".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_status_round_trips() {
        let status: PlanStatus = serde_json::from_str("\"pending_blog_topic_approval\"").unwrap();
        assert_eq!(status, PlanStatus::PendingBlogTopicApproval);
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"pending_blog_topic_approval\""
        );
    }

    #[test]
    fn unrecognized_status_falls_back_to_unknown() {
        let status: PlanStatus = serde_json::from_str("\"awaiting_quantum_flux\"").unwrap();
        assert_eq!(status, PlanStatus::Unknown);
    }

    #[test]
    fn generating_states_are_flagged() {
        assert!(PlanStatus::GeneratingTopics.is_generating());
        assert!(PlanStatus::GeneratingDrafts.is_generating());
        assert!(!PlanStatus::Complete.is_generating());
        assert!(!PlanStatus::Unknown.is_generating());
    }

    #[test]
    fn input_validation_collects_field_errors() {
        let input = ContentPlanInput {
            name: "  ".to_string(),
            blog_posts_quota: 0,
            sm_posts_quota: 10,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("blog_posts_quota"));
        assert!(!errors.contains_key("sm_posts_quota"));
    }
}
