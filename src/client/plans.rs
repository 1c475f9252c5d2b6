use serde_json::{json, Value};
use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{ContentPlan, ContentPlanInput, CorrelationRule, ScheduledPost, SuggestedTopic, TopicStatus};

impl ApiClient {
    pub async fn list_plans(&self, organization_id: Uuid) -> Result<Vec<ContentPlan>, ClientError> {
        self.send(self.get(&format!("/organizations/{}/content-plans", organization_id)))
            .await
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> Result<ContentPlan, ClientError> {
        self.send(self.get(&format!("/content-plans/{}", plan_id))).await
    }

    pub async fn create_plan(
        &self,
        organization_id: Uuid,
        input: &ContentPlanInput,
    ) -> Result<ContentPlan, ClientError> {
        self.send(
            self.post(&format!("/organizations/{}/content-plans", organization_id))
                .json(input),
        )
        .await
    }

    pub async fn update_plan(&self, plan_id: Uuid, input: &ContentPlanInput) -> Result<ContentPlan, ClientError> {
        self.send(self.put(&format!("/content-plans/{}", plan_id)).json(input)).await
    }

    pub async fn delete_plan(&self, plan_id: Uuid) -> Result<(), ClientError> {
        self.send_no_content(self.delete(&format!("/content-plans/{}", plan_id))).await
    }

    pub async fn plan_schedule(&self, plan_id: Uuid) -> Result<Vec<ScheduledPost>, ClientError> {
        self.send(self.get(&format!("/content-plans/{}/schedule", plan_id))).await
    }

    pub async fn suggested_topics(&self, plan_id: Uuid) -> Result<Vec<SuggestedTopic>, ClientError> {
        self.send(self.get(&format!("/content-plans/{}/suggested-topics", plan_id)))
            .await
    }

    /// Approve or reject one suggested topic.
    pub async fn set_topic_status(
        &self,
        plan_id: Uuid,
        topic_id: Uuid,
        status: TopicStatus,
    ) -> Result<SuggestedTopic, ClientError> {
        self.send(
            self.put(&format!("/content-plans/{}/suggested-topics/{}/status", plan_id, topic_id))
                .json(&json!({ "status": status })),
        )
        .await
    }

    pub async fn correlation_rules(&self, plan_id: Uuid) -> Result<CorrelationRule, ClientError> {
        self.send(self.get(&format!("/content-plans/{}/correlation-rules", plan_id)))
            .await
    }

    pub async fn update_correlation_rules(
        &self,
        plan_id: Uuid,
        rules: &CorrelationRule,
    ) -> Result<CorrelationRule, ClientError> {
        self.send(
            self.put(&format!("/content-plans/{}/correlation-rules", plan_id))
                .json(rules),
        )
        .await
    }

    /// Per-platform social post distribution. Backend-shaped payload, passed
    /// through as-is for display.
    pub async fn sm_distribution(&self, plan_id: Uuid) -> Result<Value, ClientError> {
        self.send(self.get(&format!("/content-plans/{}/sm-distribution", plan_id)))
            .await
    }

    /// Diagnostics from the backend's generation pipeline, passed through as-is.
    pub async fn generation_insights(&self, plan_id: Uuid) -> Result<Value, ClientError> {
        self.send(self.get(&format!("/content-plans/{}/generation-insights", plan_id)))
            .await
    }
}
