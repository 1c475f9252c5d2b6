use serde_json::json;
use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{ContentStatus, ContentVariant};

impl ApiClient {
    /// Replace the variant body. The backend bumps the version; the returned
    /// record carries the new one.
    pub async fn update_variant(&self, id: Uuid, body: &str) -> Result<ContentVariant, ClientError> {
        self.send(
            self.put(&format!("/content-variants/{}", id))
                .json(&json!({ "body": body })),
        )
        .await
    }

    pub async fn update_variant_status(
        &self,
        id: Uuid,
        status: ContentStatus,
    ) -> Result<ContentVariant, ClientError> {
        self.send(
            self.put(&format!("/content-variants/{}/status", id))
                .json(&json!({ "status": status })),
        )
        .await
    }

    /// Send the variant back to the backend with reviewer feedback.
    pub async fn request_revision(&self, id: Uuid, feedback: &str) -> Result<ContentVariant, ClientError> {
        self.send(
            self.post(&format!("/content-variants/{}/request-revision", id))
                .json(&json!({ "feedback": feedback })),
        )
        .await
    }

    /// Ask the backend to regenerate this variant from its draft.
    pub async fn regenerate_variant(&self, id: Uuid) -> Result<ContentVariant, ClientError> {
        self.send(self.post(&format!("/content-variants/{}/regenerate", id))).await
    }
}
